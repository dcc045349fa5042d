// Prompt resolution: pure template substitution against the style catalog
use crate::catalog::{self, PHOTO_URL_PLACEHOLDER, STYLE_REF_PLACEHOLDER};
use crate::error::KioskError;
use crate::models::Gender;

/// Builds the finished generation prompt for a gender/style pair.
///
/// Deterministic and side-effect free. Fails with `UnknownStyle` when the
/// catalog has no entry for `style_id`; placeholder cardinality inside the
/// catalog itself is guaranteed by `catalog::validate()`.
pub fn resolve(
    gender: Gender,
    style_id: &str,
    subject_photo_url: &str,
    style_reference_url: &str,
) -> Result<String, KioskError> {
    let style = catalog::find_style(style_id).ok_or_else(|| KioskError::UnknownStyle {
        gender,
        style_id: style_id.to_string(),
    })?;

    let resolved = style
        .prompt_template(gender)
        .replacen(PHOTO_URL_PLACEHOLDER, subject_photo_url, 1)
        .replacen(STYLE_REF_PLACEHOLDER, style_reference_url, 1);

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::STYLE_CATALOG;

    const PHOTO: &str = "https://cdn.test/subject/foto_1.jpg";
    const STYLE_REF: &str = "https://cdn.test/reference/style.png";

    #[test]
    fn test_every_pair_resolves_cleanly() {
        for style in STYLE_CATALOG {
            for gender in [Gender::Masculine, Gender::Feminine] {
                let prompt = resolve(gender, style.id, PHOTO, STYLE_REF).unwrap();
                assert!(!prompt.contains(PHOTO_URL_PLACEHOLDER), "{}", style.id);
                assert!(!prompt.contains(STYLE_REF_PLACEHOLDER), "{}", style.id);
                assert!(prompt.contains(PHOTO), "{}", style.id);
                assert!(prompt.contains(STYLE_REF), "{}", style.id);
            }
        }
    }

    #[test]
    fn test_unknown_style_fails_for_both_genders() {
        for gender in [Gender::Masculine, Gender::Feminine] {
            let err = resolve(gender, "NEON_NOIR", PHOTO, STYLE_REF).unwrap_err();
            assert!(matches!(err, KioskError::UnknownStyle { .. }));
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let a = resolve(Gender::Feminine, "SALA_PIXAR", PHOTO, STYLE_REF).unwrap();
        let b = resolve(Gender::Feminine, "SALA_PIXAR", PHOTO, STYLE_REF).unwrap();
        assert_eq!(a, b);
    }
}
