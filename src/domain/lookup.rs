use uuid::Uuid;

/// One search endpoint accepts an id, a title, or a slug. The term is
/// classified once, here, instead of at every call site: anything that
/// parses as a canonical UUID queries by primary key, everything else
/// goes through the case-insensitive title/slug match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTerm {
    Id(Uuid),
    Text(String),
}

impl LookupTerm {
    pub fn parse(term: &str) -> Self {
        if is_canonical_uuid(term) {
            if let Ok(id) = Uuid::parse_str(term) {
                return LookupTerm::Id(id);
            }
        }
        LookupTerm::Text(term.to_string())
    }
}

/// Only the 36-character hyphenated rendering counts as an id;
/// `Uuid::parse_str` alone would also take non-hyphenated and
/// `urn:uuid:` forms.
fn is_canonical_uuid(term: &str) -> bool {
    term.len() == 36
        && term.bytes().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_shaped_term_resolves_to_id() {
        let term = "02c3826d-d876-4e59-91ad-b3721f286ae2";
        assert_eq!(
            LookupTerm::parse(term),
            LookupTerm::Id(Uuid::parse_str(term).unwrap())
        );
    }

    #[test]
    fn title_resolves_to_text() {
        assert_eq!(
            LookupTerm::parse("T-Shirt Teslo"),
            LookupTerm::Text("T-Shirt Teslo".to_string())
        );
    }

    #[test]
    fn slug_resolves_to_text() {
        assert_eq!(
            LookupTerm::parse("t_shirt_teslo"),
            LookupTerm::Text("t_shirt_teslo".to_string())
        );
    }

    #[test]
    fn truncated_uuid_resolves_to_text() {
        assert!(matches!(
            LookupTerm::parse("02c3826d-d876-4e59"),
            LookupTerm::Text(_)
        ));
    }

    #[test]
    fn non_canonical_uuid_renderings_resolve_to_text() {
        // parseable by Uuid::parse_str, but not the hyphenated form
        assert!(matches!(
            LookupTerm::parse("02c3826dd8764e5991adb3721f286ae2"),
            LookupTerm::Text(_)
        ));
        assert!(matches!(
            LookupTerm::parse("urn:uuid:02c3826d-d876-4e59-91ad-b3721f286ae2"),
            LookupTerm::Text(_)
        ));
    }

    #[test]
    fn uppercase_hyphenated_uuid_still_resolves_to_id() {
        assert!(matches!(
            LookupTerm::parse("02C3826D-D876-4E59-91AD-B3721F286AE2"),
            LookupTerm::Id(_)
        ));
    }
}
