//! Entry-point discovery for submitted sources.
//!
//! The runtime launches the compiled program by type name, and the compiler
//! requires the file to be named after its public type. Only the declaration
//! signature is inspected; no parsing beyond that happens here.

const CLASS_MODIFIERS: &[&str] = &["final", "abstract", "strictfp", "sealed", "static"];

/// Name of the first `public [modifiers] class Name` declaration.
pub fn extract_entry_point(source: &str) -> Option<&str> {
    let mut words = words(source).peekable();

    while let Some(word) = words.next() {
        if word != "public" {
            continue;
        }
        while words.next_if(|w| CLASS_MODIFIERS.contains(w)).is_some() {}
        if words.next_if_eq(&"class").is_none() {
            continue;
        }
        if let Some(name) = words.next_if(|w| is_identifier(w)) {
            return Some(name);
        }
    }

    None
}

fn words(source: &str) -> impl Iterator<Item = &str> {
    source
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .filter(|w| !w.is_empty())
}

fn is_identifier(word: &str) -> bool {
    word.chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_main_class() {
        let source = r#"public class Main {
    public static void main(String[] args) {
        System.out.println("Aletheia");
    }
}"#;
        assert_eq!(extract_entry_point(source), Some("Main"));
    }

    #[test]
    fn skips_modifiers_and_brace_without_space() {
        assert_eq!(
            extract_entry_point("public final class Solver{ }"),
            Some("Solver")
        );
        assert_eq!(
            extract_entry_point("public abstract  class\nShape {}"),
            Some("Shape")
        );
    }

    #[test]
    fn ignores_non_public_and_methods() {
        let source = "class Helper {}\npublic static void main() {}\npublic class Entry {}";
        assert_eq!(extract_entry_point(source), Some("Entry"));
    }

    #[test]
    fn first_public_class_wins() {
        let source = "public class First {}\npublic class Second {}";
        assert_eq!(extract_entry_point(source), Some("First"));
    }

    #[test]
    fn missing_declaration_yields_none() {
        assert_eq!(extract_entry_point("class Main {}"), None);
        assert_eq!(extract_entry_point(""), None);
        assert_eq!(extract_entry_point("public class 9Lives {}"), None);
    }
}
