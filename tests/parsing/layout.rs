#[cfg(test)]
mod verify {
    use std::path::Path;

    use sqflint::convention::Convention;
    use sqflint::error::ParsingError;
    use sqflint::language::*;
    use sqflint::parsing;

    /// Assemble a file with the conventional header declaring the given
    /// parameter lines, followed by the given code.
    fn source(parameters: &[&str], body: &str) -> String {
        let mut content = String::from(
            "#include \"macros.hpp\"\n/*\n    Arma At War\n\n    Author: NetFusion\n\n    Description:\n    Does a thing.\n\n    Parameter(s):\n",
        );
        if parameters.is_empty() {
            content.push_str("    None\n");
        }
        for line in parameters {
            content.push_str("    ");
            content.push_str(line);
            content.push('\n');
        }
        content.push_str("\n*/\n\n");
        content.push_str(body);
        content
    }

    fn check(content: &str) -> Result<Header<'_>, ParsingError<'_>> {
        let filename = Path::new("fn_test.sqf");
        let convention = Convention::default();

        let tokens = parsing::lex(filename, content)?;
        parsing::validate(tokens, filename, content, &convention)
    }

    fn problem(content: &str) -> String {
        match check(content) {
            Ok(header) => panic!("Expected a failure, but got {:?}", header),
            Err(error) => error.problem,
        }
    }

    #[test]
    fn no_parameters_no_binding() {
        let content = source(&[], "hint \"hello\";\n");
        let header = check(&content).unwrap();
        assert!(header
            .parameters
            .is_empty());

        let content = source(&[], "");
        assert!(check(&content).is_ok());
    }

    #[test]
    fn declared_but_not_bound() {
        let content = source(&["0: Target unit <Object> (Default: objNull)"], "hint \"hello\";\n");
        assert_eq!(problem(&content), "Parameters in header not used");
    }

    #[test]
    fn bound_but_not_declared() {
        let content = source(&[], "params [\n    [\"_unit\", objNull, [objNull]]\n];\n");
        assert_eq!(problem(&content), "Missing parameters in header");

        let error = check(&content).unwrap_err();
        assert_eq!((error.line, error.column), (15, 1));
    }

    #[test]
    fn compact_header_round_trip() {
        let content = "#include \"macros.hpp\"\n/*\n    Arma At War\n    Author: NetFusion\n    Description:\n    Does a thing.\n    Parameter(s):\n    0: Target unit <Object> (Default: objNull)\n\n*/\n\nparams [\n    [\"_unit\", objNull, [objNull]]\n];\n";

        let header = check(content).unwrap();
        assert_eq!(header.authors, vec!["NetFusion"]);
        assert_eq!(
            header.parameters,
            vec![ParameterSpec {
                description: "Target unit",
                types: vec!["Object"],
                documented: "objNull",
                variable: Some("_unit"),
                value: Some(Expression::Command("objNull")),
            }]
        );

        let tokens = parsing::lex(Path::new("fn_test.sqf"), content).unwrap();
        assert_eq!(
            parsing::check_layout(tokens, Path::new("fn_test.sqf"), content, &Convention::default()),
            0
        );
    }

    #[test]
    fn number_sentinel() {
        let parameters = ["0: Count <Number> (Default: 5)"];

        let content = source(&parameters, "params [\n    [\"_count\", 5, [5]]\n];\n");
        assert_eq!(problem(&content), "Type number in header, check for 0");

        let content = source(&parameters, "params [\n    [\"_count\", 5, [0]]\n];\n");
        let header = check(&content).unwrap();
        assert_eq!(header.parameters[0].value, Some(Expression::Number("5")));
        assert_eq!(header.parameters[0].documented, "5");
    }

    #[test]
    fn array_size_check() {
        let parameters = ["0: Things <Array> (Default: [])"];

        let content = source(&parameters, "params [\n    [\"_things\", [], [[]]]\n];\n");
        assert_eq!(problem(&content), "Add array size check");

        let content = source(&parameters, "params [\n    [\"_things\", [], [[]], 3]\n];\n");
        assert!(check(&content).is_ok());

        let content = source(&parameters, "params [\n    [\"_things\", [], [[]], [2, 3]]\n];\n");
        assert!(check(&content).is_ok());

        let content = source(&parameters, "params [\n    [\"_things\", [], [[]], \"3\"]\n];\n");
        assert_eq!(problem(&content), "Expected number, got string");
    }

    #[test]
    fn several_parameters_in_order() {
        let parameters = [
            "0: Target <Object, Group> (Default: objNull)",
            "1: Name <String> (Default: \"\")",
            "2: Handler <Code> (Default: {})",
            "3: Enabled <Bool> (Default: true)",
        ];
        let body = r#"params [
    ["_target", objNull, [objNull, grpNull]],
    ["_name", "", [""]],
    ["_handler", {}, [{}]],
    ["_enabled", false, [true]]
];
"#;

        let content = source(&parameters, body);
        let header = check(&content)
            .unwrap()
            .parameters;
        let variables: Vec<Option<&str>> = header
            .iter()
            .map(|parameter| parameter.variable)
            .collect();
        assert_eq!(
            variables,
            vec![Some("_target"), Some("_name"), Some("_handler"), Some("_enabled")]
        );
        assert_eq!(header[3].value, Some(Expression::Command("false")));
    }

    #[test]
    fn types_must_follow_header_order() {
        let content = source(
            &["0: Target <Object, Group> (Default: objNull)"],
            "params [\n    [\"_target\", objNull, [grpNull, objNull]]\n];\n",
        );
        assert_eq!(problem(&content), "Type object in header, check for objNull");

        let content = source(
            &["0: Target <Object, Group> (Default: objNull)"],
            "params [\n    [\"_target\", objNull, [objNull]]\n];\n",
        );
        assert_eq!(problem(&content), "Parameter has more type in header");
    }

    #[test]
    fn sentinel_messages() {
        let cases = [
            ("Code", "[objNull]", "Type code in header, check for {}"),
            ("Array", "[objNull]", "Type array in header, check for []"),
            ("String", "[\"x\"]", "Type string in header, check for empty string"),
            ("Side", "[west]", "Type side in header, check for sideUnknown"),
            ("Control", "[displayNull]", "Type control in header, check for controlNull"),
            ("Group", "[0]", "Type group in header, check for grpNull"),
            ("Bool", "[false]", "Type bool in header, check for true"),
            ("Display", "[controlNull]", "Type display in header, check for displayNull"),
            ("Object", "[grpNull]", "Type object in header, check for objNull"),
        ];

        for (name, check_list, expected) in cases {
            let declaration = format!("0: Value <{}> (Default: nil)", name);
            let body = format!(
                "params [\n    [\"_value\", nil, {}, 2]\n];\n",
                check_list
            );
            let content = source(&[declaration.as_str()], &body);
            assert_eq!(problem(&content), expected, "for {}", name);
        }
    }

    #[test]
    fn default_array_over_several_lines() {
        let content = source(
            &["0: Position <Array> (Default: [1, 2])"],
            "params [\n    [\"_pos\", [\n        1,\n        2\n    ], [[]], 3]\n];\n",
        );
        let header = check(&content).unwrap();
        assert_eq!(
            header.parameters[0].value,
            Some(Expression::Array(vec![
                Expression::Number("1"),
                Expression::Number("2")
            ]))
        );
    }

    #[test]
    fn anything_takes_no_sentinel() {
        let content = source(
            &["0: Value <Anything> (Default: nil)"],
            "params [\n    [\"_value\", nil, []]\n];\n",
        );
        assert!(check(&content).is_ok());
    }

    #[test]
    fn parameter_count_mismatch() {
        let content = source(
            &[
                "0: Target <Object> (Default: objNull)",
                "1: Count <Number> (Default: 0)",
            ],
            "params [\n    [\"_target\", objNull, [objNull]]\n];\n",
        );
        assert_eq!(problem(&content), "Header has more parameters");

        let content = source(
            &["0: Target <Object> (Default: objNull)"],
            "params [\n    [\"_target\", objNull, [objNull]],\n    [\"_count\", 0, [0]]\n];\n",
        );
        assert_eq!(problem(&content), "Missing parameter in header");
    }

    #[test]
    fn missing_type_check() {
        let content = source(
            &["0: Target <Object> (Default: objNull)"],
            "params [\n    \"_target\"\n];\n",
        );
        assert_eq!(problem(&content), "Missing type check for parameter");

        let content = source(
            &["0: Target <Object> (Default: objNull)"],
            "params [\n    [\"_target\", objNull]\n];\n",
        );
        assert_eq!(problem(&content), "Missing type check for parameter");
    }

    #[test]
    fn expression_defaults() {
        let content = source(
            &["0: Offset <Number> (Default: -1)"],
            "params [\n    [\"_offset\", -1, [0]]\n];\n",
        );
        let header = check(&content).unwrap();
        assert_eq!(
            header.parameters[0].value,
            Some(Expression::Unary("-", Box::new(Expression::Number("1"))))
        );
    }

    #[test]
    fn include_must_match() {
        let content = source(&[], "").replace("macros.hpp", "other.hpp");
        let error = check(&content).unwrap_err();

        assert_eq!(error.problem, "Unknown include path: other.hpp");
        assert_eq!((error.line, error.column), (1, 2));
    }

    #[test]
    fn custom_convention() {
        let convention = Convention {
            title: "Other Project".to_string(),
            authors: vec!["Someone".to_string()],
            types: vec!["Number".to_string()],
            include: "script_component.hpp".to_string(),
            parameters_command: "params".to_string(),
            sentinels: vec![(
                "Number".to_string(),
                sqflint::convention::Sentinel::Number("1".to_string()),
            )],
        };

        let content = "#include \"script_component.hpp\"\n/*\n    Other Project\n\n    Author: Someone\n\n    Description:\n    Counts things.\n\n    Parameter(s):\n    0: Count <Number> (Default: 0)\n\n*/\n\nparams [\n    [\"_count\", 0, [1]]\n];\n";
        let filename = Path::new("fn_count.sqf");

        let tokens = parsing::lex(filename, content).unwrap();
        assert!(parsing::validate(tokens, filename, content, &convention).is_ok());

        // the same file fails the default convention
        assert_eq!(problem(content), "Unknown include path: script_component.hpp");
    }
}
