//! TypeScript source construction
//!
//! Generated files are assembled as structures (imports, variable
//! statements, type aliases, classes) and printed in one place, so every
//! file shares the same layout: 4-space indentation, `\n` line endings,
//! one blank line between top-level statements and between class members.

use std::fmt::Write;

const INDENT: &str = "    ";

/// A TypeScript source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// Top-level statements in output order
    pub statements: Vec<Statement>,
}

/// A top-level statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `import { a, b } from "module";`
    Import {
        module: String,
        named: Vec<String>,
    },
    /// `const name = initializer;`
    Const {
        name: String,
        initializer: String,
        exported: bool,
    },
    /// `type Name = ty;`
    TypeAlias {
        name: String,
        ty: String,
        exported: bool,
    },
    /// `class Name { .. }`
    Class(Class),
}

/// A class declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Class {
    /// Class name
    pub name: String,

    /// Emit `export`
    pub exported: bool,

    /// Methods in output order
    pub methods: Vec<Method>,
}

/// A class method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Method {
    /// Method name
    pub name: String,

    /// Emit `async`
    pub is_async: bool,

    /// Parameters in order
    pub parameters: Vec<Parameter>,

    /// Declared return type
    pub return_type: String,

    /// Body lines, without indentation
    pub body: Vec<String>,
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Declared type
    pub ty: String,
}

impl Parameter {
    /// Build a parameter
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

impl SourceFile {
    /// Print the file
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            statement.render(&mut out);
        }
        out
    }
}

impl Statement {
    fn render(&self, out: &mut String) {
        // Writing into a String cannot fail
        let _ = match self {
            Statement::Import { module, named } => {
                writeln!(out, "import {{ {} }} from \"{}\";", named.join(", "), module)
            }
            Statement::Const {
                name,
                initializer,
                exported,
            } => writeln!(out, "{}const {} = {};", export(*exported), name, initializer),
            Statement::TypeAlias { name, ty, exported } => {
                writeln!(out, "{}type {} = {};", export(*exported), name, ty)
            }
            Statement::Class(class) => {
                class.render(out);
                Ok(())
            }
        };
    }
}

impl Class {
    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "{}class {} {{", export(self.exported), self.name);
        for (i, method) in self.methods.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            method.render(out);
        }
        out.push_str("}\n");
    }
}

impl Method {
    fn render(&self, out: &mut String) {
        let params = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        let modifier = if self.is_async { "async " } else { "" };

        let _ = writeln!(
            out,
            "{INDENT}{}{}({}): {} {{",
            modifier, self.name, params, self.return_type
        );
        for line in &self.body {
            let _ = writeln!(out, "{INDENT}{INDENT}{}", line);
        }
        let _ = writeln!(out, "{INDENT}}}");
    }
}

fn export(exported: bool) -> &'static str {
    if exported { "export " } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_statements() {
        let file = SourceFile {
            statements: vec![
                Statement::Import {
                    module: "@prisma/client".to_string(),
                    named: vec!["PrismaClient".to_string(), "User".to_string()],
                },
                Statement::Const {
                    name: "prisma".to_string(),
                    initializer: "new PrismaClient()".to_string(),
                    exported: false,
                },
                Statement::TypeAlias {
                    name: "RequiredUserFields".to_string(),
                    ty: "User".to_string(),
                    exported: true,
                },
            ],
        };

        assert_eq!(
            file.render(),
            "import { PrismaClient, User } from \"@prisma/client\";\n\
             \n\
             const prisma = new PrismaClient();\n\
             \n\
             export type RequiredUserFields = User;\n"
        );
    }

    #[test]
    fn test_render_class() {
        let class = Class {
            name: "UserRepository".to_string(),
            exported: true,
            methods: vec![
                Method {
                    name: "getAll".to_string(),
                    is_async: true,
                    parameters: vec![],
                    return_type: "Promise<User[]>".to_string(),
                    body: vec!["return await prisma.user.findMany()".to_string()],
                },
                Method {
                    name: "deleteById".to_string(),
                    is_async: true,
                    parameters: vec![Parameter::new("id", "User['id']")],
                    return_type: "Promise<void>".to_string(),
                    body: vec!["await prisma.user.delete({ where: { id } })".to_string()],
                },
            ],
        };
        let code = SourceFile {
            statements: vec![Statement::Class(class)],
        }
        .render();

        assert_eq!(
            code,
            "export class UserRepository {\n\
             \x20   async getAll(): Promise<User[]> {\n\
             \x20       return await prisma.user.findMany()\n\
             \x20   }\n\
             \n\
             \x20   async deleteById(id: User['id']): Promise<void> {\n\
             \x20       await prisma.user.delete({ where: { id } })\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn test_empty_class() {
        let code = SourceFile {
            statements: vec![Statement::Class(Class {
                name: "Empty".to_string(),
                ..Default::default()
            })],
        }
        .render();
        assert_eq!(code, "class Empty {\n}\n");
    }
}
