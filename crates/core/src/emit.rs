use crate::models::{DestinationGroup, ElementKind};

/// Serialize one destination group back into source text.
///
/// Imports come first, followed by a blank line when there are any. Every
/// other element follows in group order, each trailed by one blank line.
/// Returns `None` for an empty group.
pub fn emit_group(group: &DestinationGroup) -> Option<String> {
    if group.is_empty() {
        return None;
    }

    let mut lines: Vec<&str> = Vec::new();

    let mut has_imports = false;
    for element in group.elements.iter().filter(|e| e.kind == ElementKind::Import) {
        lines.extend(element.lines.iter().map(String::as_str));
        has_imports = true;
    }
    if has_imports {
        lines.push("");
    }

    for element in group.elements.iter().filter(|e| e.kind != ElementKind::Import) {
        lines.extend(element.lines.iter().map(String::as_str));
        lines.push("");
    }

    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Element;

    fn function(name: &str, body: &[&str]) -> Element {
        let mut element = Element::new(ElementKind::Function, name, body[0], 1);
        for line in &body[1..] {
            element.push_line(line);
        }
        element
    }

    #[test]
    fn test_import_and_function() {
        let mut group = DestinationGroup::new("out.js", true);
        group.elements.push(Element::new(
            ElementKind::Import,
            "import a from 'a';",
            "import a from 'a';",
            1,
        ));
        group.elements.push(function("f", &["function f() {", "  return 1;", "}"]));

        assert_eq!(
            emit_group(&group).unwrap(),
            "import a from 'a';\n\nfunction f() {\n  return 1;\n}\n"
        );
    }

    #[test]
    fn test_imports_hoisted() {
        let mut group = DestinationGroup::new("out.js", true);
        group.elements.push(Element::new(ElementKind::Variable, "x", "let x = 1;", 1));
        group.elements.push(Element::new(ElementKind::Import, "import b;", "import b;", 2));
        group.elements.push(function("g", &["function g() {", "}"]));

        assert_eq!(
            emit_group(&group).unwrap(),
            "import b;\n\nlet x = 1;\n\nfunction g() {\n}\n"
        );
    }

    #[test]
    fn test_no_imports_no_leading_blank() {
        let mut group = DestinationGroup::new("out.js", false);
        group.elements.push(function("g", &["  function g() {", "  }"]));

        assert_eq!(emit_group(&group).unwrap(), "  function g() {\n  }\n");
    }

    #[test]
    fn test_crlf_lines_written_back() {
        let mut group = DestinationGroup::new("out.js", true);
        group.elements.extend(crate::scanner::scan("import a;\r\nfunction f() {\r\n}\r\n"));

        assert_eq!(emit_group(&group).unwrap(), "import a;\r\n\nfunction f() {\r\n}\r\n");
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(emit_group(&DestinationGroup::new("none.js", false)), None);
    }
}
