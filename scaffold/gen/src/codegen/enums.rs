//! Enumerations.

use scaffold_define::{EnumEntity, EnumsSettings, Platform};

use crate::artifact::{Artifact, ArtifactKind, ArtifactSet};
use crate::errors::{ErrorContext, GeneratorError};
use crate::writer::SourceWriter;

/// Emits `enumeration` on `platform` when it applies there.
///
/// Auto-sequenced ordinals count only the values that survive the platform
/// filter, so a value excluded from one platform does not leave a gap.
pub fn emit_enum(
    enumeration: &EnumEntity,
    platform: Platform,
    settings: &EnumsSettings,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    if !enumeration.location.includes(platform) {
        return Ok(());
    }
    let context = ErrorContext::new(&enumeration.name, ArtifactKind::Enum);
    check_ordinal_mode(enumeration, &context)?;

    let mut writer = SourceWriter::enumeration(&settings.namespace, &enumeration.name);
    writer
        .using("System")
        .usings(&enumeration.additional_usings)
        .attributes(&enumeration.custom_attributes);

    let values = enumeration.values.iter().filter(|v| v.location.includes(platform));
    for (position, value) in values.enumerate() {
        let ordinal = match &value.default_value {
            Some(literal) => literal.trim().to_string(),
            None => position.to_string(),
        };
        writer.member(&value.name, ordinal);
    }

    out.insert(Artifact::new(
        platform,
        &enumeration.name,
        ArtifactKind::Enum,
        writer.render(),
    ))
}

/// Auto-sequencing and explicit ordinals are exclusive per enum.
pub(crate) fn check_ordinal_mode(
    enumeration: &EnumEntity,
    context: &ErrorContext,
) -> Result<(), GeneratorError> {
    for value in &enumeration.values {
        let explicit = value
            .default_value
            .as_deref()
            .is_some_and(|literal| !literal.trim().is_empty());
        match (enumeration.auto_gen_sequence_number, explicit) {
            (true, true) => {
                return Err(context.error(format!(
                    "value '{}' declares an ordinal but the enum is auto-sequenced",
                    value.name
                )));
            }
            (false, false) => {
                return Err(context.error(format!(
                    "value '{}' has no ordinal and the enum is not auto-sequenced",
                    value.name
                )));
            }
            _ => {}
        }
    }
    Ok(())
}
