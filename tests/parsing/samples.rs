#[cfg(test)]
mod samples {
    use std::path::Path;

    use sqflint::convention::Convention;
    use sqflint::parsing;

    #[test]
    fn ensure_samples_pass() {
        let dir = Path::new("tests/samples/");

        assert!(dir.exists(), "samples directory missing");

        let files = parsing::discover(dir, "sqf")
            .expect("Failed to read samples directory")
            .files;

        assert!(!files.is_empty(), "No .sqf files found in samples directory");

        let convention = Convention::default();
        let mut failures = Vec::new();

        for file in &files {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let tokens = parsing::lex(&file, &content)
                .unwrap_or_else(|e| panic!("Failed to lex file {:?}: {}", file, e));

            match parsing::validate(tokens, &file, &content, &convention) {
                Ok(_) => {}
                Err(e) => {
                    println!("File {:?} failed the layout check: {}", file, e);
                    failures.push(file.clone());
                }
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should pass, but {} files failed",
                failures.len()
            );
        }
    }

    #[test]
    fn check_layout_counts_nothing_for_samples() {
        let convention = Convention::default();
        let files = parsing::discover(Path::new("tests/samples/"), "sqf")
            .unwrap()
            .files;

        let total: u32 = files
            .iter()
            .map(|file| {
                let content = parsing::load(file).unwrap();
                let tokens = parsing::lex(file, &content).unwrap();
                parsing::check_layout(tokens, file, &content, &convention)
            })
            .sum();

        assert_eq!(total, 0);
    }

    #[test]
    fn discovery_filters_by_extension() {
        let found = parsing::discover(Path::new("tests/"), "sqf").unwrap();
        assert!(found
            .unreadable
            .is_empty());
        let files = found.files;

        assert!(files
            .iter()
            .any(|file| file.ends_with("samples/fn_init.sqf")));
        assert!(files
            .iter()
            .any(|file| file.ends_with("broken/wrong_sentinel.sqf")));
        assert!(!files
            .iter()
            .any(|file| file
                .extension()
                .and_then(|s| s.to_str())
                == Some("rs")));

        let single = Path::new("tests/samples/fn_init.sqf");
        assert_eq!(
            parsing::discover(single, "sqf")
                .unwrap()
                .files,
            vec![single.to_path_buf()]
        );

        assert!(parsing::discover(Path::new("tests/nonexistent/"), "sqf").is_err());
    }
}
