//! Query execution.
//!
//! Every read is a single parameterized statement and takes no lock. Joins
//! that compare intervals also compare the tree column on a multi-tree
//! schema, so a read never crosses into another partition.

use nestset_core::{Node, NodeKey, TreeId, Value};
use nestset_schema::Schema;
use nestset_store::RowStore;

use crate::materialize::{node_from_row, nodes_from_rows};
use crate::QueryResult;

/// Query executor.
pub struct QueryExecutor<'r, 's, S: RowStore + ?Sized> {
    schema: &'r Schema,
    store: &'s S,
}

impl<'r, 's, S: RowStore + ?Sized> QueryExecutor<'r, 's, S> {
    /// Create a new executor.
    pub fn new(schema: &'r Schema, store: &'s S) -> Self {
        Self { schema, store }
    }

    /// `alias.column`, with the column quoted.
    fn col(&self, alias: &str, quoted: String) -> String {
        format!("{}.{}", alias, quoted)
    }

    /// ` AND a.tree IS b.tree` on a multi-tree schema, empty otherwise.
    fn same_tree(&self, a: &str, b: &str) -> String {
        match self.schema.q_tree() {
            Some(tree) => format!(
                " AND {} IS {}",
                self.col(a, tree.clone()),
                self.col(b, tree)
            ),
            None => String::new(),
        }
    }

    fn fetch_all(&self, sql: &str, params: &[Value]) -> QueryResult<Vec<Node>> {
        let rows = self.store.query(sql, params)?;
        tracing::trace!(table = self.schema.table(), rows = rows.len(), "fetched");
        nodes_from_rows(self.schema, rows)
    }

    fn fetch_one(&self, sql: &str, params: &[Value]) -> QueryResult<Option<Node>> {
        self.store
            .query_row(sql, params)?
            .map(|row| node_from_row(self.schema, row))
            .transpose()
    }

    /// Look up one node by key.
    pub fn get_node(&self, key: NodeKey) -> QueryResult<Option<Node>> {
        let s = self.schema;
        let sql = format!("SELECT * FROM {} WHERE {} = ?", s.q_table(), s.q_key());
        self.fetch_one(&sql, &[Value::Int(key.raw())])
    }

    /// The node referenced by `key`'s parent column.
    pub fn get_parent(&self, key: NodeKey) -> QueryResult<Option<Node>> {
        let s = self.schema;
        let sql = format!(
            "SELECT p.* FROM {t} AS n JOIN {t} AS p ON {pk} = {np} WHERE {nk} = ?",
            t = s.q_table(),
            pk = self.col("p", s.q_key()),
            np = self.col("n", s.q_parent()),
            nk = self.col("n", s.q_key()),
        );
        self.fetch_one(&sql, &[Value::Int(key.raw())])
    }

    /// Immediate children in left-bound order.
    pub fn get_children(&self, key: NodeKey) -> QueryResult<Vec<Node>> {
        let s = self.schema;
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ? ORDER BY {}",
            s.q_table(),
            s.q_parent(),
            s.q_left()
        );
        self.fetch_all(&sql, &[Value::Int(key.raw())])
    }

    pub fn count_children(&self, key: NodeKey) -> QueryResult<u64> {
        let s = self.schema;
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ?",
            s.q_table(),
            s.q_parent()
        );
        let count = self
            .store
            .query_scalar(&sql, &[Value::Int(key.raw())])?
            .and_then(|v| v.as_int())
            .unwrap_or(0);
        Ok(count.max(0) as u64)
    }

    pub fn has_children(&self, key: NodeKey) -> QueryResult<bool> {
        Ok(self.count_children(key)? > 0)
    }

    /// Every node whose interval strictly contains `key`'s, root first.
    pub fn get_ancestors(&self, key: NodeKey) -> QueryResult<Vec<Node>> {
        let s = self.schema;
        let sql = format!(
            "SELECT a.* FROM {t} AS n JOIN {t} AS a ON {al} < {nl} AND {ar} > {nr}{tree} \
             WHERE {nk} = ? ORDER BY {al}",
            t = s.q_table(),
            al = self.col("a", s.q_left()),
            ar = self.col("a", s.q_right()),
            nl = self.col("n", s.q_left()),
            nr = self.col("n", s.q_right()),
            tree = self.same_tree("a", "n"),
            nk = self.col("n", s.q_key()),
        );
        self.fetch_all(&sql, &[Value::Int(key.raw())])
    }

    /// `key` followed by all of its descendants, in left-bound order.
    ///
    /// Empty if `key` does not exist.
    pub fn get_tree(&self, key: NodeKey) -> QueryResult<Vec<Node>> {
        self.subtree(key, true)
    }

    /// All descendants of `key`, in left-bound order.
    pub fn get_descendants(&self, key: NodeKey) -> QueryResult<Vec<Node>> {
        self.subtree(key, false)
    }

    fn subtree(&self, key: NodeKey, include_self: bool) -> QueryResult<Vec<Node>> {
        let s = self.schema;
        let (dl, nl, nr) = (
            self.col("d", s.q_left()),
            self.col("n", s.q_left()),
            self.col("n", s.q_right()),
        );
        let range = if include_self {
            format!("{} BETWEEN {} AND {}", dl, nl, nr)
        } else {
            format!("{} > {} AND {} < {}", dl, nl, dl, nr)
        };
        let sql = format!(
            "SELECT d.* FROM {t} AS n JOIN {t} AS d ON {range}{tree} WHERE {nk} = ? ORDER BY {dl}",
            t = s.q_table(),
            range = range,
            tree = self.same_tree("d", "n"),
            nk = self.col("n", s.q_key()),
            dl = dl,
        );
        self.fetch_all(&sql, &[Value::Int(key.raw())])
    }

    /// Rows whose parent column is NULL or 0.
    pub fn get_roots(&self) -> QueryResult<Vec<Node>> {
        let s = self.schema;
        let order = match s.q_tree() {
            Some(tree) => format!("{}, {}", tree, s.q_key()),
            None => s.q_key(),
        };
        let sql = format!(
            "SELECT * FROM {t} WHERE {p} IS NULL OR {p} = 0 ORDER BY {order}",
            t = s.q_table(),
            p = s.q_parent(),
            order = order
        );
        self.fetch_all(&sql, &[])
    }

    /// Every row of the table, ordered by partition and left bound.
    pub fn get_all(&self) -> QueryResult<Vec<Node>> {
        let s = self.schema;
        let order = match s.q_tree() {
            Some(tree) => format!("{}, {}", tree, s.q_left()),
            None => s.q_left(),
        };
        let sql = format!("SELECT * FROM {} ORDER BY {}", s.q_table(), order);
        self.fetch_all(&sql, &[])
    }

    /// Nodes without descendants, optionally limited to one partition.
    ///
    /// The tree id is ignored on a single-tree schema.
    pub fn get_tree_leafs(&self, tree: Option<TreeId>) -> QueryResult<Vec<Node>> {
        let s = self.schema;
        let mut params = Vec::new();
        let mut sql = format!(
            "SELECT * FROM {t} WHERE {r} = {l} + 1",
            t = s.q_table(),
            r = s.q_right(),
            l = s.q_left()
        );
        let mut order = s.q_left();
        if let Some(column) = s.q_tree() {
            if let Some(tree) = tree {
                sql.push_str(&format!(" AND {} = ?", column));
                params.push(Value::Int(tree.raw()));
            }
            order = format!("{}, {}", column, order);
        }
        sql.push_str(&format!(" ORDER BY {}", order));
        self.fetch_all(&sql, &params)
    }
}
