//! Document assembler: literal placeholder substitution followed by
//! conditional-section pruning.
//!
//! Substitution runs first, so placeholders inside a conditional region are
//! resolved whether or not the region survives. Pruning is a single
//! tokenizing scan over the text — no regex, and repeated same-named
//! sections are each handled with non-greedy extent.

use devis_core::derive::{DerivedFields, SectionFlags};

const COMMENT_OPEN: &str = "<!--";
const IF_OPEN: &str = "<!--IF:";
const ENDIF_OPEN: &str = "<!--ENDIF:";
const MARKER_CLOSE: &str = "-->";

/// Assemble the final markup from a template, derived fields, and flags.
///
/// Total: placeholders without a matching key and markers without a
/// matching flag pass through verbatim (a visible rendering defect beats a
/// silent one).
pub fn assemble(template: &str, fields: &DerivedFields, flags: &SectionFlags) -> String {
    let substituted = substitute(template, fields);
    prune_sections(&substituted, flags)
}

/// Replace every `{{KEY}}` occurrence with its field value.
///
/// Each key is replaced in one pass over the text, so a value containing
/// its own placeholder token is not re-expanded.
fn substitute(template: &str, fields: &DerivedFields) -> String {
    let mut out = template.to_string();
    for (key, value) in fields.iter() {
        let token = format!("{{{{{key}}}}}");
        if out.contains(&token) {
            out = out.replace(&token, value);
        }
    }
    out
}

/// Resolve `<!--IF:NAME--> … <!--ENDIF:NAME-->` spans against the flag set:
/// true keeps the inner content (markers stripped), false deletes the whole
/// span, unknown names pass through untouched.
fn prune_sections(input: &str, flags: &SectionFlags) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    // Kept sections whose end markers still need stripping.
    let mut open: Vec<String> = Vec::new();

    while let Some(at) = rest.find(COMMENT_OPEN) {
        out.push_str(&rest[..at]);
        rest = &rest[at..];

        if let Some(after) = rest.strip_prefix(IF_OPEN) {
            let Some(name_end) = after.find(MARKER_CLOSE) else {
                break; // unterminated marker: emit the remainder verbatim
            };
            let name = &after[..name_end];
            let marker_len = IF_OPEN.len() + name_end + MARKER_CLOSE.len();

            match flags.get(name) {
                Some(true) => {
                    open.push(name.to_string());
                    rest = &rest[marker_len..];
                }
                Some(false) => {
                    let end_marker = format!("{ENDIF_OPEN}{name}{MARKER_CLOSE}");
                    let body = &rest[marker_len..];
                    if let Some(end) = body.find(&end_marker) {
                        rest = &body[end + end_marker.len()..];
                    } else {
                        // Unmatched IF passes through.
                        out.push_str(&rest[..marker_len]);
                        rest = &rest[marker_len..];
                    }
                }
                None => {
                    out.push_str(&rest[..marker_len]);
                    rest = &rest[marker_len..];
                }
            }
        } else if let Some(after) = rest.strip_prefix(ENDIF_OPEN) {
            let Some(name_end) = after.find(MARKER_CLOSE) else {
                break;
            };
            let name = &after[..name_end];
            let marker_len = ENDIF_OPEN.len() + name_end + MARKER_CLOSE.len();

            if let Some(pos) = open.iter().rposition(|n| n == name) {
                open.remove(pos);
            } else {
                // Stray end marker for a section we did not open.
                out.push_str(&rest[..marker_len]);
            }
            rest = &rest[marker_len..];
        } else {
            // Ordinary HTML comment.
            out.push_str(COMMENT_OPEN);
            rest = &rest[COMMENT_OPEN.len()..];
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&'static str, &str)]) -> DerivedFields {
        DerivedFields::new(
            pairs
                .iter()
                .map(|(k, v)| (*k, v.to_string()))
                .collect(),
        )
    }

    fn flags(pairs: &[(&'static str, bool)]) -> SectionFlags {
        SectionFlags::new(pairs.to_vec())
    }

    #[test]
    fn substitutes_every_occurrence() {
        let out = assemble(
            "Bonjour {{NOM}}, oui {{NOM}} — {{PRIX}} €",
            &fields(&[("NOM", "Durand"), ("PRIX", "24,90")]),
            &flags(&[]),
        );
        assert_eq!(out, "Bonjour Durand, oui Durand — 24,90 €");
    }

    #[test]
    fn unresolved_placeholders_are_left_in_place() {
        let out = assemble("{{INCONNU}}", &fields(&[("NOM", "x")]), &flags(&[]));
        assert_eq!(out, "{{INCONNU}}");
    }

    #[test]
    fn value_containing_its_own_token_is_not_re_expanded() {
        let out = assemble(
            "{{NOM}}",
            &fields(&[("NOM", "{{NOM}} et fils")]),
            &flags(&[]),
        );
        assert_eq!(out, "{{NOM}} et fils");
    }

    #[test]
    fn email_section_round_trip() {
        let template = "<!--IF:EMAIL-->{{EMAIL}}<!--ENDIF:EMAIL-->";

        let out = assemble(
            template,
            &fields(&[("EMAIL", "")]),
            &flags(&[("EMAIL", false)]),
        );
        assert_eq!(out, "");

        let out = assemble(
            template,
            &fields(&[("EMAIL", "a@b.com")]),
            &flags(&[("EMAIL", true)]),
        );
        assert_eq!(out, "a@b.com");
    }

    #[test]
    fn repeated_sections_are_each_resolved() {
        let template = "<!--IF:A-->x<!--ENDIF:A-->.<!--IF:A-->y<!--ENDIF:A-->";
        assert_eq!(
            assemble(template, &fields(&[]), &flags(&[("A", true)])),
            "x.y"
        );
        assert_eq!(
            assemble(template, &fields(&[]), &flags(&[("A", false)])),
            "."
        );
    }

    #[test]
    fn sections_of_different_names_do_not_interfere() {
        let template = "<!--IF:A-->a<!--IF:B-->b<!--ENDIF:B-->a<!--ENDIF:A-->";
        assert_eq!(
            assemble(
                template,
                &fields(&[]),
                &flags(&[("A", true), ("B", false)])
            ),
            "aa"
        );
        assert_eq!(
            assemble(
                template,
                &fields(&[]),
                &flags(&[("A", false), ("B", true)])
            ),
            ""
        );
    }

    #[test]
    fn unknown_marker_names_pass_through() {
        let template = "<!--IF:MYSTERE-->caché<!--ENDIF:MYSTERE-->";
        assert_eq!(
            assemble(template, &fields(&[]), &flags(&[("EMAIL", true)])),
            template
        );
    }

    #[test]
    fn plain_comments_survive() {
        let template = "<!-- note --><!--IF:A-->x<!--ENDIF:A-->";
        assert_eq!(
            assemble(template, &fields(&[]), &flags(&[("A", false)])),
            "<!-- note -->"
        );
    }

    #[test]
    fn unterminated_marker_passes_through() {
        let template = "avant <!--IF:EMAIL";
        assert_eq!(
            assemble(template, &fields(&[]), &flags(&[("EMAIL", true)])),
            template
        );
    }

    #[test]
    fn placeholders_inside_pruned_sections_resolve_first() {
        // Substitution happens before pruning, so a false section containing
        // a placeholder simply disappears with it.
        let template = "<!--IF:TELEPHONE-->Tél: {{TELEPHONE}}<!--ENDIF:TELEPHONE-->reste";
        let out = assemble(
            template,
            &fields(&[("TELEPHONE", "0601020304")]),
            &flags(&[("TELEPHONE", false)]),
        );
        assert_eq!(out, "reste");
    }
}
