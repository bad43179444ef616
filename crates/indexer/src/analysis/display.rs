use crate::analysis::types::{ClassModel, Extraction, MethodModel};
use std::fmt;

/// Indented console rendering of what was extracted from one unit
pub struct ExtractionTree<'a> {
    unit_id: &'a str,
    extraction: &'a Extraction,
}

impl<'a> ExtractionTree<'a> {
    pub fn new(unit_id: &'a str, extraction: &'a Extraction) -> Self {
        Self {
            unit_id,
            extraction,
        }
    }
}

impl fmt::Display for ExtractionTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.unit_id)?;
        for class in &self.extraction.classes {
            write_class(f, class)?;
        }
        Ok(())
    }
}

fn write_class(f: &mut fmt::Formatter<'_>, class: &ClassModel) -> fmt::Result {
    match &class.superclass_name {
        Some(superclass) => writeln!(f, "  class {} extends {superclass}", class.name)?,
        None => writeln!(f, "  class {}", class.name)?,
    }
    for field in &class.fields {
        writeln!(f, "    field {}: {}", field.name, field.type_name)?;
    }
    for method in &class.methods {
        write_method(f, method)?;
    }
    Ok(())
}

fn write_method(f: &mut fmt::Formatter<'_>, method: &MethodModel) -> fmt::Result {
    let parameters = method
        .parameters
        .iter()
        .map(|parameter| format!("{} {}", parameter.type_name, parameter.param_name))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(f, "    method {}({parameters})", method.name)?;

    for behavior in &method.behavior_summary {
        writeln!(f, "      {behavior}")?;
    }
    for callee in &method.called_method_ids {
        writeln!(f, "      -> {callee}")?;
    }
    Ok(())
}
