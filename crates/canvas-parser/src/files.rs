use models::course_data::{CanvasFile, FlatFile};

/// Lists every file in an exported file tree
///
/// Traverses depth-first in sibling order. Each path is built from the folder
/// names joined with `/`, prefixed by `base_path` when it is not empty.
/// Folders without children contribute nothing.
///
/// # Arguments
/// * `tree` - The top-level nodes of the tree
/// * `base_path` - Path the tree is rooted at, usually `""`
///
/// # Returns
/// One [`FlatFile`] per file node
pub fn flatten_files(tree: &[CanvasFile], base_path: &str) -> Vec<FlatFile> {
    let mut flat = Vec::new();
    collect(tree, base_path, &mut flat);
    flat
}

fn collect(nodes: &[CanvasFile], base_path: &str, flat: &mut Vec<FlatFile>) {
    for node in nodes {
        let path = if base_path.is_empty() {
            node.name().to_string()
        } else {
            format!("{base_path}/{}", node.name())
        };

        match node {
            CanvasFile::File { name, size, .. } => flat.push(FlatFile {
                name: name.clone(),
                path,
                size: *size,
            }),
            CanvasFile::Folder { .. } => collect(node.children(), &path, flat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> CanvasFile {
        CanvasFile::File {
            name: name.to_string(),
            path: None,
            size: Some(size),
        }
    }

    fn folder(name: &str, files: Option<Vec<CanvasFile>>) -> CanvasFile {
        CanvasFile::Folder {
            name: name.to_string(),
            path: None,
            files,
        }
    }

    /// Counts file nodes by plain recursive descent
    fn count_files(nodes: &[CanvasFile]) -> usize {
        nodes
            .iter()
            .map(|node| match node {
                CanvasFile::File { .. } => 1,
                CanvasFile::Folder { .. } => count_files(node.children()),
            })
            .sum()
    }

    #[test]
    fn test_flatten_nested_structure() {
        let tree = vec![
            folder(
                "Lectures",
                Some(vec![file("Lec1.pdf", 1000), file("Lec2.pdf", 2000)]),
            ),
            folder("Assignments", Some(vec![file("HW1.pdf", 500)])),
        ];

        let flat = flatten_files(&tree, "");

        assert_eq!(flat.len(), 3);
        assert_eq!(
            flat,
            vec![
                FlatFile {
                    name: "Lec1.pdf".to_string(),
                    path: "Lectures/Lec1.pdf".to_string(),
                    size: Some(1000),
                },
                FlatFile {
                    name: "Lec2.pdf".to_string(),
                    path: "Lectures/Lec2.pdf".to_string(),
                    size: Some(2000),
                },
                FlatFile {
                    name: "HW1.pdf".to_string(),
                    path: "Assignments/HW1.pdf".to_string(),
                    size: Some(500),
                },
            ]
        );
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_files(&[], "").is_empty());
    }

    #[test]
    fn test_flatten_with_base_path() {
        let tree = vec![file("notes.txt", 1), folder("a", Some(vec![file("b.txt", 2)]))];
        let paths: Vec<String> = flatten_files(&tree, "course")
            .into_iter()
            .map(|f| f.path)
            .collect();

        assert_eq!(paths, vec!["course/notes.txt", "course/a/b.txt"]);
    }

    #[test]
    fn test_flatten_skips_childless_folders() {
        let tree = vec![
            folder("null", None),
            folder("empty", Some(vec![])),
            file("root.txt", 4),
        ];

        let flat = flatten_files(&tree, "");
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].path, "root.txt");
    }

    #[test]
    fn test_flatten_deep_nesting() {
        let mut tree = vec![file("leaf.txt", 1)];
        for depth in (0..20).rev() {
            tree = vec![folder(&format!("d{depth}"), Some(tree)), file("x", 0)];
        }

        let flat = flatten_files(&tree, "");
        assert_eq!(flat.len(), count_files(&tree));
        assert_eq!(flat.len(), 21);

        let deepest = flat.iter().find(|f| f.name == "leaf.txt").unwrap();
        let expected: Vec<String> = (0..20).map(|d| format!("d{d}")).collect();
        assert_eq!(deepest.path, format!("{}/leaf.txt", expected.join("/")));
    }

    #[test]
    fn test_flatten_paths_are_prefix_consistent() {
        let tree = vec![folder(
            "A",
            Some(vec![
                folder("B", Some(vec![file("1", 1), file("2", 2)])),
                file("3", 3),
            ]),
        )];

        for flat in flatten_files(&tree, "") {
            assert!(flat.path.starts_with("A/"));
            assert!(flat.path.ends_with(&flat.name));
        }
    }
}
