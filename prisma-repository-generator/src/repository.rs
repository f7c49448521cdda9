//! Repository synthesis
//!
//! Decides, from one model's field list, which data-access methods its
//! repository class gets, and assembles the TypeScript file around them.
//! The result depends on nothing but that model.

use crate::dmmf::{Field, Model};
use crate::typescript::{Class, Method, Parameter, SourceFile, Statement};
use heck::ToLowerCamelCase;
use std::path::PathBuf;

/// Module the generated client and model types are imported from
pub const CLIENT_MODULE: &str = "@prisma/client";

/// Client type instantiated once per generated file
pub const CLIENT_TYPE: &str = "PrismaClient";

/// Name of the module-level client instance
pub const CLIENT_HANDLE: &str = "prisma";

/// Extension of generated files
pub const FILE_EXTENSION: &str = "ts";

/// A rendered output file, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path (`user/user.repository.ts`)
    pub path: PathBuf,

    /// File contents
    pub content: String,
}

/// Everything needed to emit one model's repository
#[derive(Debug, Clone)]
pub struct RepositoryPlan {
    /// Model name, verbatim
    pub model_name: String,

    /// Lower-camel model name: directory, file stem and client accessor
    pub handle: String,

    /// `Required<Model>Fields`
    pub alias_name: String,

    /// Right-hand side of the alias
    pub alias_type: String,

    /// Types imported from the client module
    pub imports: Vec<String>,

    /// Class methods in output order
    pub methods: Vec<Method>,
}

impl RepositoryPlan {
    /// Generated class name
    pub fn class_name(&self) -> String {
        format!("{}Repository", self.model_name)
    }

    /// Output path relative to the output root
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.handle).join(format!("{}.repository.{}", self.handle, FILE_EXTENSION))
    }

    /// Names of the emitted methods, in order
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}

/// Decide the method set, alias and imports for a model
pub fn plan(model: &Model) -> RepositoryPlan {
    let model_name = model.name.as_str();
    let handle = model_name.to_lower_camel_case();
    let alias_name = format!("Required{}Fields", model_name);
    let client = format!("{}.{}", CLIENT_HANDLE, handle);

    // The id parameter is typed after the model's id field; models without one
    // still address relations through `id`
    let id_field = model.id_field();
    let id_name = id_field.map(|f| f.name.as_str()).unwrap_or("id");
    let id_param = || Parameter::new("id", format!("{}['{}']", model_name, id_name));
    let where_id = where_id(id_name);

    let mut methods = vec![
        Method {
            name: "create".to_string(),
            is_async: true,
            parameters: vec![Parameter::new("data", &alias_name)],
            return_type: format!("Promise<{}>", model_name),
            body: vec![format!("return await {}.create({{ data }})", client)],
        },
        Method {
            name: "getAll".to_string(),
            is_async: true,
            parameters: vec![],
            return_type: format!("Promise<{}[]>", model_name),
            body: vec![format!("return await {}.findMany()", client)],
        },
    ];

    if id_field.is_some() {
        methods.push(Method {
            name: "getById".to_string(),
            is_async: true,
            parameters: vec![id_param()],
            return_type: format!("Promise<{} | null>", model_name),
            body: vec![format!(
                "return await {}.findFirst({{ {} }})",
                client, where_id
            )],
        });
        methods.push(Method {
            name: "updateById".to_string(),
            is_async: true,
            parameters: vec![id_param(), Parameter::new("data", &alias_name)],
            return_type: format!("Promise<{} | null>", model_name),
            body: vec![format!(
                "return await {}.update({{ {}, data }})",
                client, where_id
            )],
        });
        methods.push(Method {
            name: "deleteById".to_string(),
            is_async: true,
            parameters: vec![id_param()],
            return_type: "Promise<void>".to_string(),
            body: vec![format!("await {}.delete({{ {} }})", client, where_id)],
        });
    }

    let mut imports = vec![CLIENT_TYPE.to_string(), model_name.to_string()];

    for relation in model.relation_fields() {
        let getter = relation_getter(&handle, &client, &where_id, id_param(), relation);
        push_or_replace(&mut methods, getter);
        push_unique(&mut imports, &relation.field_type);
    }

    RepositoryPlan {
        model_name: model_name.to_string(),
        alias_type: required_fields_type(model),
        handle,
        alias_name,
        imports,
        methods,
    }
}

/// Render a plan into a TypeScript file
pub fn render(plan: &RepositoryPlan) -> String {
    SourceFile {
        statements: vec![
            Statement::Import {
                module: CLIENT_MODULE.to_string(),
                named: plan.imports.clone(),
            },
            Statement::Const {
                name: CLIENT_HANDLE.to_string(),
                initializer: format!("new {}()", CLIENT_TYPE),
                exported: false,
            },
            Statement::TypeAlias {
                name: plan.alias_name.clone(),
                ty: plan.alias_type.clone(),
                exported: true,
            },
            Statement::Class(Class {
                name: plan.class_name(),
                exported: true,
                methods: plan.methods.clone(),
            }),
        ],
    }
    .render()
}

/// Plan and render the repository file for a model
pub fn generate_file(model: &Model) -> GeneratedFile {
    let plan = plan(model);
    GeneratedFile {
        path: plan.relative_path(),
        content: render(&plan),
    }
}

/// The input shape of `create`: the model minus fields the database fills in
pub fn required_fields_type(model: &Model) -> String {
    let omitted: Vec<String> = model
        .defaulted_fields()
        .map(|f| format!("'{}'", f.name))
        .collect();

    if omitted.is_empty() {
        model.name.clone()
    } else {
        format!("Omit<{}, {}>", model.name, omitted.join(" | "))
    }
}

/// Name of the getter for a relation field: `get<Model><Field>`
pub fn relation_getter_name(handle: &str, field_name: &str) -> String {
    format!("get{}{}", title_case(handle), title_case(field_name))
}

fn relation_getter(
    handle: &str,
    client: &str,
    where_id: &str,
    id_param: Parameter,
    relation: &Field,
) -> Method {
    let field = relation.name.as_str();
    Method {
        name: relation_getter_name(handle, field),
        is_async: true,
        parameters: vec![id_param],
        return_type: format!("Promise<{}[]>", relation.field_type),
        body: vec![
            format!(
                "const data = await {}.findFirst({{ {}, select: {{ {}: true }} }})",
                client, where_id, field
            ),
            format!("return data?.{} ?? []", field),
        ],
    }
}

/// `where: { id }`, or `where: { key: id }` for other id field names
fn where_id(id_name: &str) -> String {
    if id_name == "id" {
        "where: { id }".to_string()
    } else {
        format!("where: {{ {}: id }}", id_name)
    }
}

/// Uppercase the first character, leave the rest untouched
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Later methods with a colliding name replace the earlier one in place
fn push_or_replace(methods: &mut Vec<Method>, method: Method) {
    match methods.iter_mut().find(|m| m.name == method.name) {
        Some(existing) => *existing = method,
        None => methods.push(method),
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
