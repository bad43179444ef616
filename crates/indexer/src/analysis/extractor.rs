use crate::analysis::naming::qualify;
use crate::analysis::statements::StatementAction;
use crate::analysis::types::{
    CallIndex, ClassModel, Extraction, FieldModel, MethodModel, ParameterModel,
};
use crate::parsing::ast::{CompilationUnit, Member, MethodDeclaration, TypeDeclaration, TypeKind};
use std::collections::BTreeSet;

/// Builds the class models and call index of one unit.
///
/// Every class declaration in the tree is visited as if it were top level,
/// including inner and local classes. Calls are assumed to target a method of
/// the same unit and are qualified with `unit_id`.
pub fn extract(unit: &CompilationUnit, unit_id: &str) -> Extraction {
    let mut call_index = CallIndex::new();

    let classes = unit
        .walk_types()
        .into_iter()
        .filter(|declaration| declaration.kind == TypeKind::Class)
        .map(|declaration| extract_class(declaration, unit_id, &mut call_index))
        .collect();

    Extraction {
        classes,
        call_index,
    }
}

fn extract_class(
    declaration: &TypeDeclaration,
    unit_id: &str,
    call_index: &mut CallIndex,
) -> ClassModel {
    let mut fields = Vec::new();
    let mut methods = Vec::new();

    for member in &declaration.members {
        match member {
            Member::Field(field) => {
                fields.extend(field.declarators.iter().map(|name| FieldModel {
                    name: name.clone(),
                    type_name: field.field_type.name.clone(),
                }));
            }
            Member::Method(method) => {
                let model = extract_method(method, unit_id);
                call_index.insert(
                    qualify(unit_id, &model.name),
                    model.called_method_ids.clone(),
                );
                methods.push(model);
            }
            Member::Constructor(_) | Member::Type(_) | Member::Other => {}
        }
    }

    ClassModel {
        name: declaration.name.clone(),
        superclass_name: declaration
            .superclass
            .as_ref()
            .map(|superclass| superclass.name.clone()),
        fields,
        methods,
    }
}

fn extract_method(method: &MethodDeclaration, unit_id: &str) -> MethodModel {
    let mut behavior_summary = Vec::new();
    let mut called_method_ids = BTreeSet::new();

    for statement in method.body.iter().flatten() {
        let action = StatementAction::classify(statement);
        behavior_summary.push(action.to_string());
        if let Some(member) = action.called_member() {
            called_method_ids.insert(qualify(unit_id, member));
        }
    }

    MethodModel {
        name: method.name.clone(),
        parameters: method
            .parameters
            .iter()
            .map(|parameter| ParameterModel {
                type_name: parameter.param_type.name.clone(),
                param_name: parameter.name.clone(),
            })
            .collect(),
        behavior_summary,
        called_method_ids,
    }
}
