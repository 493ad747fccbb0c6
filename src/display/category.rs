//! Category display formatting
//!
//! Formats the category taxonomy as an indented tree.

use crate::models::CategoryTaxonomy;

const INDENT: usize = 4;

/// Format the taxonomy as `- label` lines, indented by depth
pub fn format_category_tree(taxonomy: &CategoryTaxonomy) -> String {
    let mut output = String::new();

    for (depth, node) in taxonomy.walk() {
        output.push_str(&format!("{}- {}\n", " ".repeat(depth * INDENT), node.label()));
    }

    if output.is_empty() {
        output.push_str("No categories defined.\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryNode;

    #[test]
    fn test_default_tree() {
        let output = format_category_tree(&CategoryTaxonomy::default());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "- expense");
        assert_eq!(lines[1], "    - food");
        assert_eq!(lines[2], "        - meal");
        assert_eq!(lines[5], "    - transportation");
        assert_eq!(lines[8], "- income");
        assert_eq!(lines[9], "    - salary");
    }

    #[test]
    fn test_flat_tree() {
        let taxonomy =
            CategoryTaxonomy::new(vec![CategoryNode::leaf("misc"), CategoryNode::leaf("gift")])
                .unwrap();
        assert_eq!(format_category_tree(&taxonomy), "- misc\n- gift\n");
    }

    #[test]
    fn test_empty_tree() {
        let taxonomy = CategoryTaxonomy::new(Vec::new()).unwrap();
        assert_eq!(format_category_tree(&taxonomy), "No categories defined.\n");
    }
}
