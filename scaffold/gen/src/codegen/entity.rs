//! Entity and summary data classes.

use scaffold_define::{Entity, Summary};

use super::{DataClass, RenderTarget, emit_data_class, emitted_key};
use crate::artifact::{ArtifactKind, ArtifactSet};
use crate::capability::{Capability, DescribedType, Facets};
use crate::errors::{ErrorContext, GeneratorError};

/// Emits `<Entity>` and `<Entity>Validator` when the entity applies to the
/// target platform.
pub fn emit_entity(
    entity: &Entity,
    target: &RenderTarget<'_>,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    if !entity.location.includes(target.platform()) {
        return Ok(());
    }

    let described = DescribedType::compose(
        &entity.name,
        Capability::Entity,
        Facets {
            data_state: entity.include_data_state,
            key: emitted_key(&entity.fields, target.platform()),
            row_version: entity.include_row_version_control,
            audit_log: entity.include_audit_log,
        },
    );

    let mut class = DataClass::new(
        &entity.name,
        ArtifactKind::Entity,
        ErrorContext::new(&entity.name, ArtifactKind::Entity),
        &entity.fields,
    );
    class.inheritance = described.interfaces().collect();
    class.usings = entity.additional_usings.clone();
    class.attributes = &entity.custom_attributes;
    class.trailing = described.trailing_properties();

    emit_data_class(target, class, out)
}

/// Emits `<Summary>` and `<Summary>Validator`. Summaries never carry data state.
pub fn emit_summary(
    summary: &Summary,
    target: &RenderTarget<'_>,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    if !summary.location.includes(target.platform()) {
        return Ok(());
    }

    let described = DescribedType::compose(
        &summary.name,
        Capability::Summary,
        Facets {
            data_state: false,
            key: emitted_key(&summary.fields, target.platform()),
            row_version: summary.include_row_version_control,
            audit_log: summary.include_audit_log,
        },
    );

    let mut class = DataClass::new(
        &summary.name,
        ArtifactKind::Summary,
        ErrorContext::new(&summary.name, ArtifactKind::Summary),
        &summary.fields,
    );
    class.inheritance = described.interfaces().collect();
    class.usings = summary.additional_usings.clone();
    class.attributes = &summary.custom_attributes;
    class.trailing = described.trailing_properties();

    emit_data_class(target, class, out)
}
