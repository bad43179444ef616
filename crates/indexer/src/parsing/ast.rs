//! Owned syntax tree for a Java compilation unit.
//!
//! Only the shapes the class graph needs are modelled. Everything else is
//! kept as an opaque `Other` variant carrying its grammar kind or source text.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    pub types: Vec<TypeDeclaration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub kind: TypeKind,
    pub name: String,
    pub superclass: Option<TypeRef>,
    pub members: Vec<Member>,
}

/// A type reduced to its simple name, e.g. `java.util.List<String>[]` -> `List`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field(FieldDeclaration),
    Method(MethodDeclaration),
    Constructor(ConstructorDeclaration),
    Type(TypeDeclaration),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub field_type: TypeRef,
    pub declarators: Vec<String>,
    /// Classes declared inside initializers, e.g. in a lambda body
    pub nested_types: Vec<TypeDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub param_type: TypeRef,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// `None` for abstract and interface methods
    pub body: Option<Vec<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Statement>,
}

/// Every variant except `LocalType` keeps the type declarations found
/// anywhere inside it, so that a flat walk over the unit still reaches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Expression {
        expression: Expression,
        nested_types: Vec<TypeDeclaration>,
    },
    LocalVariable(LocalVariableDeclaration),
    LocalType(TypeDeclaration),
    /// Any other statement
    Other {
        kind: String,
        nested_types: Vec<TypeDeclaration>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVariableDeclaration {
    pub variable_type: TypeRef,
    pub declarators: Vec<String>,
    pub nested_types: Vec<TypeDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    MethodInvocation { receiver: Receiver, member: String },
    Assignment {
        target: String,
        operator: String,
        value: String,
    },
    Other { text: String },
}

/// What a method is invoked on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// `foo()`
    None,
    /// `helper.foo()`, `System.out.println()`
    Name(String),
    /// `this.foo()`, `super.foo()`, `a().b()`, `new X().foo()`
    Complex(String),
}

impl CompilationUnit {
    /// Every type declaration in the unit in source order, parents before
    /// their nested, local and inner declarations.
    pub fn walk_types(&self) -> Vec<&TypeDeclaration> {
        let mut found = Vec::new();
        for declaration in &self.types {
            collect_types(declaration, &mut found);
        }
        found
    }
}

fn collect_types<'a>(declaration: &'a TypeDeclaration, found: &mut Vec<&'a TypeDeclaration>) {
    found.push(declaration);
    for member in &declaration.members {
        match member {
            Member::Type(nested) => collect_types(nested, found),
            Member::Method(method) => {
                for statement in method.body.iter().flatten() {
                    collect_statement_types(statement, found);
                }
            }
            Member::Constructor(constructor) => {
                for statement in &constructor.body {
                    collect_statement_types(statement, found);
                }
            }
            Member::Field(field) => {
                for nested in &field.nested_types {
                    collect_types(nested, found);
                }
            }
            Member::Other => {}
        }
    }
}

fn collect_statement_types<'a>(statement: &'a Statement, found: &mut Vec<&'a TypeDeclaration>) {
    match statement {
        Statement::LocalType(declaration) => collect_types(declaration, found),
        Statement::Expression { nested_types, .. }
        | Statement::LocalVariable(LocalVariableDeclaration { nested_types, .. })
        | Statement::Other { nested_types, .. } => {
            for declaration in nested_types {
                collect_types(declaration, found);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, members: Vec<Member>) -> TypeDeclaration {
        TypeDeclaration {
            kind: TypeKind::Class,
            name: name.to_string(),
            superclass: None,
            members,
        }
    }

    #[test]
    fn test_walk_types_is_preorder() {
        let local = class("Local", vec![]);
        let inner = class("Inner", vec![]);
        let outer = class(
            "Outer",
            vec![
                Member::Method(MethodDeclaration {
                    name: "run".to_string(),
                    parameters: vec![],
                    body: Some(vec![Statement::Other {
                        kind: "if_statement".to_string(),
                        nested_types: vec![local],
                    }]),
                }),
                Member::Type(inner),
            ],
        );
        let unit = CompilationUnit {
            types: vec![outer, class("Second", vec![])],
        };

        let names = unit
            .walk_types()
            .into_iter()
            .map(|declaration| declaration.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Outer", "Local", "Inner", "Second"]);
    }
}
