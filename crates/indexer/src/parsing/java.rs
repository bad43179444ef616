use crate::parsing::ast::{
    CompilationUnit, ConstructorDeclaration, Expression, FieldDeclaration,
    LocalVariableDeclaration, Member, MethodDeclaration, Parameter, Receiver, Statement,
    TypeDeclaration, TypeKind, TypeRef,
};
use crate::parsing::{ParseError, SourceParser};
use tree_sitter::{Node, Parser};

/// Java parser backed by tree-sitter. Any error or missing node in the
/// concrete syntax tree rejects the whole unit.
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| ParseError::Language(e.to_string()))?;
        Ok(Self { parser })
    }
}

impl SourceParser for JavaParser {
    fn extension(&self) -> &'static str {
        "java"
    }

    fn parse(&mut self, source: &str) -> Result<CompilationUnit, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(first_syntax_error(root, source));
        }

        let types = named_children(root)
            .into_iter()
            .filter_map(|child| lower_type_declaration(child, source))
            .collect();

        Ok(CompilationUnit { types })
    }
}

fn first_syntax_error(root: Node, source: &str) -> ParseError {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let position = node.start_position();
            let message = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                let snippet = text(node, source)
                    .split_whitespace()
                    .take(5)
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("unexpected `{snippet}`")
            };
            return ParseError::Syntax {
                line: position.row + 1,
                column: position.column + 1,
                message,
            };
        }
        if node.has_error() {
            // Push in reverse so the leftmost error is reported first
            let mut children = all_children(node);
            children.reverse();
            stack.extend(children);
        }
    }

    let position = root.start_position();
    ParseError::Syntax {
        line: position.row + 1,
        column: position.column + 1,
        message: "malformed source".to_string(),
    }
}

fn lower_type_declaration(node: Node, source: &str) -> Option<TypeDeclaration> {
    let kind = match node.kind() {
        "class_declaration" => TypeKind::Class,
        "interface_declaration" => TypeKind::Interface,
        "enum_declaration" => TypeKind::Enum,
        "record_declaration" => TypeKind::Record,
        "annotation_type_declaration" => TypeKind::Annotation,
        _ => return None,
    };

    let name = text(node.child_by_field_name("name")?, source).to_string();
    let superclass = node
        .child_by_field_name("superclass")
        .and_then(|superclass| named_children(superclass).into_iter().next())
        .map(|type_node| type_ref(type_node, source));
    let members = node
        .child_by_field_name("body")
        .map(|body| lower_members(body, source))
        .unwrap_or_default();

    Some(TypeDeclaration {
        kind,
        name,
        superclass,
        members,
    })
}

fn lower_members(body: Node, source: &str) -> Vec<Member> {
    let mut members = Vec::new();
    for child in named_children(body) {
        match child.kind() {
            "field_declaration" | "constant_declaration" => {
                members.push(Member::Field(lower_field(child, source)));
            }
            "method_declaration" => {
                if let Some(method) = lower_method(child, source) {
                    members.push(Member::Method(method));
                }
            }
            "constructor_declaration" | "compact_constructor_declaration" => {
                if let Some(constructor) = lower_constructor(child, source) {
                    members.push(Member::Constructor(constructor));
                }
            }
            // Members that follow the constants of an enum
            "enum_body_declarations" => members.extend(lower_members(child, source)),
            _ => match lower_type_declaration(child, source) {
                Some(nested) => members.push(Member::Type(nested)),
                None => members.push(Member::Other),
            },
        }
    }
    members
}

fn lower_field(node: Node, source: &str) -> FieldDeclaration {
    FieldDeclaration {
        field_type: node
            .child_by_field_name("type")
            .map(|type_node| type_ref(type_node, source))
            .unwrap_or_else(|| TypeRef::new("")),
        declarators: declarator_names(node, source),
        nested_types: nested_type_declarations(node, source),
    }
}

fn lower_method(node: Node, source: &str) -> Option<MethodDeclaration> {
    Some(MethodDeclaration {
        name: text(node.child_by_field_name("name")?, source).to_string(),
        parameters: lower_parameters(node, source),
        body: node
            .child_by_field_name("body")
            .map(|body| lower_block(body, source)),
    })
}

fn lower_constructor(node: Node, source: &str) -> Option<ConstructorDeclaration> {
    Some(ConstructorDeclaration {
        name: text(node.child_by_field_name("name")?, source).to_string(),
        parameters: lower_parameters(node, source),
        body: node
            .child_by_field_name("body")
            .map(|body| lower_block(body, source))
            .unwrap_or_default(),
    })
}

fn lower_parameters(node: Node, source: &str) -> Vec<Parameter> {
    let Some(parameters) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    named_children(parameters)
        .into_iter()
        .filter_map(|parameter| match parameter.kind() {
            "formal_parameter" => Some(Parameter {
                param_type: parameter
                    .child_by_field_name("type")
                    .map(|type_node| type_ref(type_node, source))?,
                name: text(parameter.child_by_field_name("name")?, source).to_string(),
            }),
            // `String... args`
            "spread_parameter" => {
                let children = named_children(parameter);
                let type_node = children
                    .iter()
                    .find(|child| child.kind() != "modifiers")?;
                let declarator = children
                    .iter()
                    .find(|child| child.kind() == "variable_declarator")?;
                Some(Parameter {
                    param_type: type_ref(*type_node, source),
                    name: text(declarator.child_by_field_name("name")?, source).to_string(),
                })
            }
            _ => None,
        })
        .collect()
}

/// Statements of a block or constructor body, comments excluded
fn lower_block(block: Node, source: &str) -> Vec<Statement> {
    all_children(block)
        .into_iter()
        .filter(|child| !child.is_extra() && !matches!(child.kind(), "{" | "}"))
        .map(|child| lower_statement(child, source))
        .collect()
}

fn lower_statement(node: Node, source: &str) -> Statement {
    match node.kind() {
        "expression_statement" => match named_children(node).into_iter().next() {
            Some(expression) => Statement::Expression {
                expression: lower_expression(expression, source),
                nested_types: nested_type_declarations(node, source),
            },
            None => Statement::Other {
                kind: node.kind().to_string(),
                nested_types: Vec::new(),
            },
        },
        "local_variable_declaration" => Statement::LocalVariable(LocalVariableDeclaration {
            variable_type: node
                .child_by_field_name("type")
                .map(|type_node| type_ref(type_node, source))
                .unwrap_or_else(|| TypeRef::new("")),
            declarators: declarator_names(node, source),
            nested_types: nested_type_declarations(node, source),
        }),
        _ => match lower_type_declaration(node, source) {
            Some(declaration) => Statement::LocalType(declaration),
            None => Statement::Other {
                kind: node.kind().to_string(),
                nested_types: nested_type_declarations(node, source),
            },
        },
    }
}

fn lower_expression(node: Node, source: &str) -> Expression {
    match node.kind() {
        "method_invocation" => match node.child_by_field_name("name") {
            Some(name) => Expression::MethodInvocation {
                receiver: receiver(node, source),
                member: text(name, source).to_string(),
            },
            None => Expression::Other {
                text: compact_text(node, source),
            },
        },
        "assignment_expression" => Expression::Assignment {
            target: node
                .child_by_field_name("left")
                .map(|left| compact_text(left, source))
                .unwrap_or_default(),
            operator: node
                .child_by_field_name("operator")
                .map(|operator| text(operator, source).to_string())
                .unwrap_or_else(|| "=".to_string()),
            value: node
                .child_by_field_name("right")
                .map(|right| compact_text(right, source))
                .unwrap_or_default(),
        },
        _ => Expression::Other {
            text: compact_text(node, source),
        },
    }
}

fn receiver(invocation: Node, source: &str) -> Receiver {
    // `super.foo()` has no `object` field, the keyword is an unnamed child
    if all_children(invocation)
        .iter()
        .any(|child| child.kind() == "super")
    {
        return Receiver::Complex("super".to_string());
    }

    match invocation.child_by_field_name("object") {
        None => Receiver::None,
        Some(object) if is_name_path(object) => Receiver::Name(compact_text(object, source)),
        Some(object) => Receiver::Complex(compact_text(object, source)),
    }
}

/// `a`, `a.b`, `a.b.c`: identifiers joined by field access only
fn is_name_path(node: Node) -> bool {
    match node.kind() {
        "identifier" => true,
        "field_access" => {
            node.child_by_field_name("object").is_some_and(is_name_path)
                && node
                    .child_by_field_name("field")
                    .is_some_and(|field| field.kind() == "identifier")
        }
        _ => false,
    }
}

fn type_ref(node: Node, source: &str) -> TypeRef {
    TypeRef::new(simple_type_name(node, source))
}

fn simple_type_name(node: Node, source: &str) -> String {
    match node.kind() {
        "generic_type" | "annotated_type" | "scoped_type_identifier" => {
            let children = named_children(node);
            let base = if node.kind() == "generic_type" {
                children.first()
            } else {
                children
                    .iter()
                    .rev()
                    .find(|child| !matches!(child.kind(), "annotation" | "marker_annotation"))
            };
            base.map(|child| simple_type_name(*child, source))
                .unwrap_or_else(|| compact_text(node, source))
        }
        "array_type" => node
            .child_by_field_name("element")
            .map(|element| simple_type_name(element, source))
            .unwrap_or_else(|| compact_text(node, source)),
        _ => compact_text(node, source),
    }
}

fn declarator_names(node: Node, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.children_by_field_name("declarator", &mut cursor)
        .filter_map(|declarator| declarator.child_by_field_name("name"))
        .map(|name| text(name, source).to_string())
        .collect()
}

/// Type declarations anywhere below `node`, without descending into the ones found
fn nested_type_declarations(node: Node, source: &str) -> Vec<TypeDeclaration> {
    let mut found = Vec::new();
    for child in named_children(node) {
        match lower_type_declaration(child, source) {
            Some(declaration) => found.push(declaration),
            None => found.extend(nested_type_declarations(child, source)),
        }
    }
    found
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn all_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

fn compact_text(node: Node, source: &str) -> String {
    text(node, source)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
