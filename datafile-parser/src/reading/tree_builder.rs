//! Tree Builder - places each new line in the tree by its indentation
//!
//! The builder keeps a stack of the nodes that can still receive children,
//! each with the indentation of its line. The root sits at the bottom with no
//! indentation at all, below any real line. For a new line with indentation
//! `w`, every entry indented `w` or more is closed, and whatever is left on top
//! becomes the parent. Dedenting several levels is therefore a single pop loop,
//! and sibling lines do not need identical indentation: anything not deeper
//! than the previous line closes it.

use crate::node::NodeId;

#[derive(Debug, Clone)]
pub struct TreeBuilder {
    open: Vec<(NodeId, Option<usize>)>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            open: vec![(NodeId::ROOT, None)],
        }
    }

    /// Close every node indented at least `indent` and return the parent for a
    /// line at that indentation.
    pub fn parent_for(&mut self, indent: usize) -> NodeId {
        while let Some(&(_, Some(level))) = self.open.last() {
            if level < indent {
                break;
            }
            self.open.pop();
        }
        self.open.last().map_or(NodeId::ROOT, |&(id, _)| id)
    }

    /// Record `id`, read at `indent`, as the innermost open node.
    pub fn open(&mut self, id: NodeId, indent: usize) {
        self.open.push((id, Some(indent)));
    }

    /// Number of open nodes, the root included.
    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::DataFile;
    use crate::testing::assert_tree;

    #[test]
    fn test_root_is_parent_of_unindented_lines() {
        let mut builder = TreeBuilder::new();
        assert_eq!(builder.parent_for(0), NodeId::ROOT);
        assert_eq!(builder.depth(), 1);
    }

    #[test]
    fn test_multi_level_dedent_pops_in_one_step() {
        fn place(file: &mut DataFile, builder: &mut TreeBuilder, name: &str, indent: usize) -> NodeId {
            let parent = builder.parent_for(indent);
            let id = file.append(parent, [name]);
            builder.open(id, indent);
            id
        }

        let mut file = DataFile::new();
        let mut builder = TreeBuilder::new();

        let a = place(&mut file, &mut builder, "a", 0);
        place(&mut file, &mut builder, "b", 1);
        place(&mut file, &mut builder, "c", 2);
        assert_eq!(builder.depth(), 4);

        assert_eq!(builder.parent_for(0), NodeId::ROOT);
        assert_eq!(builder.depth(), 1);
        assert_eq!(file.node(a).children().len(), 1);
    }

    #[test]
    fn test_indentation_0_1_2_1_0() {
        let file = DataFile::parse("line1\n\tline2\n\t\tline3\n\tline4\nline5\n");
        assert_tree(&file)
            .item_count(2)
            .item(0, |line1| {
                line1
                    .tokens(&["line1"])
                    .child_count(2)
                    .child(0, |line2| {
                        line2.tokens(&["line2"]).child_count(1).child(0, |line3| {
                            line3.tokens(&["line3"]).leaf();
                        });
                    })
                    .child(1, |line4| {
                        line4.tokens(&["line4"]).leaf();
                    });
            })
            .item(1, |line5| {
                line5.tokens(&["line5"]).leaf();
            });
    }

    #[test]
    fn test_uneven_sibling_indentation() {
        // b is indented 4, c only 2: c is not deeper than b, so it closes b and
        // becomes a's second child.
        let file = DataFile::parse("a\n    b\n  c\n");
        assert_tree(&file).item_count(1).item(0, |a| {
            a.child_count(2)
                .child(0, |b| {
                    b.tokens(&["b"]).leaf();
                })
                .child(1, |c| {
                    c.tokens(&["c"]).leaf();
                });
        });
    }

    #[test]
    fn test_first_line_may_be_indented() {
        let file = DataFile::parse("  a\nb\n");
        assert_tree(&file).item_count(2);
    }
}
