#[cfg(test)]
mod verify {
    use std::path::Path;

    use sqflint::convention::Convention;
    use sqflint::language::*;
    use sqflint::parsing::header::parse_header;

    fn comment(text: &str, line: usize) -> Token<'_> {
        Token::new(TokenKind::BlockComment, text, line, 1)
    }

    #[test]
    fn header_from_the_readme() {
        let text = "\n    Arma At War\n    Author: NetFusion\n    Description:\n    Does a thing.\n    Parameter(s):\n    0: Target unit <Object> (Default: objNull)\n\n";
        let convention = Convention::default();

        let header = parse_header(&comment(text, 2), &convention, Path::new("fn_test.sqf"), "");

        assert_eq!(
            header,
            Ok(Header {
                authors: vec!["NetFusion"],
                description: vec!["Does a thing."],
                parameters: vec![ParameterSpec::new("Target unit", vec!["Object"], "objNull")],
            })
        );
    }

    #[test]
    fn error_lines_follow_the_comment() {
        let text = "\n    Arma At War\n\n    Author: Nobody\n";
        let convention = Convention::default();

        let error = parse_header(&comment(text, 10), &convention, Path::new("fn_test.sqf"), "")
            .unwrap_err();
        assert_eq!(error.problem, "Invalid authors");
        assert_eq!(error.line, 13);
        assert!(error
            .details
            .contains("'joko // Jonas'"));
    }

    #[test]
    fn conventions_are_independent() {
        let text = "\n    Other Project\n\n    Author: Someone\n\n    Description:\n    Does a thing.\n\n    Parameter(s):\n    0: Ratio <Float> (Default: 0.5)\n\n";

        let mut convention = Convention::default();
        let result = parse_header(&comment(text, 1), &convention, Path::new("a.sqf"), "");
        assert_eq!(
            result
                .unwrap_err()
                .problem,
            "Invalid project title"
        );

        convention.title = "Other Project".to_string();
        convention
            .authors
            .push("Someone".to_string());
        let result = parse_header(&comment(text, 1), &convention, Path::new("a.sqf"), "");
        assert_eq!(
            result
                .unwrap_err()
                .problem,
            "Invalid parameter definition"
        );

        convention
            .types
            .push("Float".to_string());
        let result = parse_header(&comment(text, 1), &convention, Path::new("a.sqf"), "");
        assert_eq!(
            result
                .unwrap()
                .parameters[0]
                .types,
            vec!["Float"]
        );
    }
}
