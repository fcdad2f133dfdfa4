use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Marker written wherever a value is missing, so no field is ever silently blank.
pub const PLACEHOLDER: &str = "{{COMPLETAR}}";

/// Turns `jane.doe@co.com` into `Jane Doe`.
///
/// Values without `@` are treated as display names and only trimmed.
pub fn format_name_from_email(value: &str) -> String {
    let value = value.trim();
    let Some((local, _)) = value.split_once('@') else {
        return value.to_string();
    };

    local
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed value, or [`PLACEHOLDER`] when blank.
pub fn safe_text(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Comparison key for labels and style names: trimmed, lower-cased, accents removed.
pub fn fold_label(value: &str) -> String {
    value
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_becomes_display_name() {
        assert_eq!(format_name_from_email("jane.doe@co.com"), "Jane Doe");
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        assert_eq!(format_name_from_email("a..b@x.com"), "A B");
        assert_eq!(format_name_from_email(".maria.@x.com"), "Maria");
    }

    #[test]
    fn test_segments_are_capitalized() {
        assert_eq!(format_name_from_email("JOHN.smith@co.com"), "John Smith");
        assert_eq!(format_name_from_email("ángel.núñez@co.es"), "Ángel Núñez");
    }

    #[test]
    fn test_single_segment_local_part() {
        assert_eq!(format_name_from_email("  admin@co.com "), "Admin");
    }

    #[test]
    fn test_non_email_is_trimmed_only() {
        assert_eq!(format_name_from_email("  María José  "), "María José");
        assert_eq!(format_name_from_email("jane.doe"), "jane.doe");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(format_name_from_email(""), "");
        assert_eq!(format_name_from_email("   "), "");
        assert_eq!(format_name_from_email("@co.com"), "");
    }

    #[test]
    fn test_safe_text_placeholder_for_blank() {
        assert_eq!(safe_text(""), PLACEHOLDER);
        assert_eq!(safe_text(" \t\n "), PLACEHOLDER);
    }

    #[test]
    fn test_safe_text_trims() {
        assert_eq!(safe_text("  Great teamwork \n"), "Great teamwork");
    }

    #[test]
    fn test_fold_label() {
        assert_eq!(fold_label("  Autoevaluación "), "autoevaluacion");
        assert_eq!(fold_label("TÍTULO 1"), "titulo 1");
        assert_eq!(fold_label("Feedback recibido"), "feedback recibido");
    }
}
