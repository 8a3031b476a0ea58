//! Scenario integration tests.
//!
//! Every step is followed by a full invariant check of the table.

use nestset_tests::prelude::*;

mod category_tree {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("category_tree")
            .table("category")
            .operations("category.ops")
            .step("make_root", |a| a.created(1).bounds("R", 1, 2).root("R"))
            .step("add_first_child", |a| {
                a.bounds("A", 2, 3).bounds("R", 1, 4).parent("A", "R")
            })
            .step("push_new_first_child", |a| {
                a.bounds("B", 2, 3)
                    .bounds("A", 4, 5)
                    .bounds("R", 1, 6)
                    .children("R", &["B", "A"])
            })
            .step("add_sibling_after_a", |a| {
                a.bounds("C", 6, 7)
                    .bounds("R", 1, 8)
                    .parent("C", "R")
                    .children("R", &["B", "A", "C"])
            })
            .step("delete_subtree_a", |a| {
                a.removed(1)
                    .gone("A")
                    .bounds("R", 1, 6)
                    .bounds("B", 2, 3)
                    .bounds("C", 4, 5)
            })
            .step("nest_under_c", |a| {
                a.created(2)
                    .bounds("C", 4, 9)
                    .bounds("D", 5, 8)
                    .bounds("E", 6, 7)
                    .bounds("R", 1, 10)
            })
            .step("promote_d_children", |a| {
                a.removed(1)
                    .gone("D")
                    .bounds("E", 5, 6)
                    .parent("E", "C")
                    .bounds("C", 4, 7)
                    .bounds("R", 1, 8)
            })
            .step("delete_missing", |a| a.error("not found").rows(4))
            .step("delete_root", |a| {
                a.removed(1)
                    .rows(3)
                    .root("B")
                    .root("C")
                    .bounds("B", 1, 2)
                    .bounds("C", 3, 6)
                    .bounds("E", 4, 5)
                    .parent("E", "C")
            })
    }

    #[test]
    fn test_category_tree_lifecycle() {
        scenario().run().unwrap();
    }
}

mod menus {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("menus")
            .table("menu")
            .multi_tree()
            .null_root_parent()
            .operations("menus.ops")
            .step("explicit_tree", |a| {
                a.created(3)
                    .tree("Main", 5)
                    .tree("About", 5)
                    .bounds("Main", 1, 6)
                    .children("Main", &["Home", "About"])
            })
            .step("allocated_tree", |a| a.tree("Footer", 6).bounds("Footer", 1, 2))
            .step("footer_children", |a| {
                a.bounds("Footer", 1, 4)
                    .bounds("Legal", 2, 3)
                    .bounds("Main", 1, 6)
            })
            .step("child_without_tree", |a| a.error("pass a tree id").rows(5))
            .step("child_in_wrong_tree", |a| a.error_matches("not found: #\\d+"))
            .step("drop_main", |a| {
                a.removed(3)
                    .rows(2)
                    .gone("Main")
                    .gone("Home")
                    .bounds("Footer", 1, 4)
                    .bounds("Legal", 2, 3)
            })
    }

    #[test]
    fn test_independent_menus() {
        scenario().run().unwrap();
    }
}

mod inline {
    use super::*;

    #[test]
    fn test_siblings_keep_insertion_order() {
        let ops = r#"
--# build
root R
child A of R
sibling B after A
sibling C after B
sibling D after A
"#;

        Scenario::new("siblings")
            .operations_source(ops)
            .unwrap()
            .step("build", |a| {
                a.created(5)
                    .children("R", &["A", "D", "B", "C"])
                    .bounds("R", 1, 10)
                    .bounds("D", 4, 5)
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_tree_id_on_single_tree_table_rejected() {
        let ops = r#"
--# root_in_tree
root R in 1
"#;

        Scenario::new("single_tree_id")
            .operations_source(ops)
            .unwrap()
            .step("root_in_tree", |a| a.error("has no tree column").rows(0))
            .run()
            .unwrap();
    }

    #[test]
    fn test_second_root_refused() {
        let ops = r#"
--# setup
root R
child A of R

--# another_root
root S
"#;

        Scenario::new("second_root")
            .operations_source(ops)
            .unwrap()
            .step("setup", |a| a.rows(2).bounds("R", 1, 4))
            .step("another_root", |a| {
                a.error("already holds").rows(2).bounds("R", 1, 4).bounds("A", 2, 3)
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_delete_tree_needs_tree_column() {
        let ops = r#"
--# setup
root R

--# drop
delete-tree 1
"#;

        Scenario::new("delete_tree_single")
            .operations_source(ops)
            .unwrap()
            .step("setup", |a| a.rows(1))
            .step("drop", |a| a.error("no tree column").rows(1))
            .run()
            .unwrap();
    }

    #[test]
    fn test_deep_subtree_removal() {
        let ops = r#"
--# build
root R
child A of R
child B of A
child C of B
sibling X after A

--# cut
delete-subtree A
"#;

        Scenario::new("deep")
            .operations_source(ops)
            .unwrap()
            .step("build", |a| a.bounds("R", 1, 10).bounds("X", 8, 9))
            .step("cut", |a| {
                a.removed(3)
                    .gone("A")
                    .gone("B")
                    .gone("C")
                    .bounds("R", 1, 4)
                    .bounds("X", 2, 3)
            })
            .run()
            .unwrap();
    }
}
