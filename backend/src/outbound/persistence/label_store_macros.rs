//! Macro generating the Diesel code for one label table.
//!
//! Tags and ingredients live in structurally identical tables with their own
//! join tables, and Diesel's table types differ per table, so the queries are
//! stamped out once per kind.

/// Generate a label store module and its [`LabelRepository`] adapter.
///
/// The generated module exposes, for use inside a recipe transaction:
/// - `get_or_create`: resolve a selection with `INSERT .. ON CONFLICT DO
///   NOTHING` followed by a re-read of the inserted names
/// - `replace_links`: set a recipe's associations to exactly the given labels
/// - `load_for_recipe`: the recipe's labels in ascending id order
///
/// [`LabelRepository`]: crate::domain::ports::LabelRepository
macro_rules! diesel_label_store {
    (
        $(#[$meta:meta])*
        pub struct $repo:ident;
        kind: $kind:expr,
        module: $module:ident,
        table: $table:ident,
        links: $links:ident ($link_column:ident),
    ) => {
        pub(crate) mod $module {
            use diesel::prelude::*;
            use diesel_async::{AsyncPgConnection, RunQueryDsl};

            use crate::domain::{Label, LabelSelection, UserId, plan_resolution};

            use super::super::models::{LabelRow, labels_from_rows};
            use super::super::schema::{$links, $table};

            async fn load_named(
                conn: &mut AsyncPgConnection,
                owner: &UserId,
                names: &[&str],
            ) -> QueryResult<Vec<Label>> {
                let rows: Vec<LabelRow> = $table::table
                    .filter($table::user_id.eq(*owner.as_uuid()))
                    .filter($table::name.eq_any(names.to_vec()))
                    .select(($table::id, $table::user_id, $table::name))
                    .load(conn)
                    .await?;
                labels_from_rows(rows)
            }

            pub(crate) async fn get_or_create(
                conn: &mut AsyncPgConnection,
                owner: &UserId,
                selection: &LabelSelection,
            ) -> QueryResult<Vec<Label>> {
                if selection.is_empty() {
                    return Ok(Vec::new());
                }
                let names: Vec<&str> = selection.names().iter().map(AsRef::as_ref).collect();
                let existing = load_named(conn, owner, &names).await?;
                let plan = plan_resolution(&existing, selection);
                if plan.create().is_empty() {
                    return Ok(plan.resolve(Vec::new()));
                }

                let missing: Vec<&str> = plan.create().iter().map(AsRef::as_ref).collect();
                let rows: Vec<_> = missing
                    .iter()
                    .map(|name| {
                        (
                            $table::user_id.eq(*owner.as_uuid()),
                            $table::name.eq(*name),
                        )
                    })
                    .collect();
                diesel::insert_into($table::table)
                    .values(rows)
                    .on_conflict(($table::user_id, $table::name))
                    .do_nothing()
                    .execute(conn)
                    .await?;
                let created = load_named(conn, owner, &missing).await?;
                Ok(plan.resolve(created))
            }

            pub(crate) async fn replace_links(
                conn: &mut AsyncPgConnection,
                recipe_id: i64,
                labels: &[Label],
            ) -> QueryResult<()> {
                diesel::delete($links::table.filter($links::recipe_id.eq(recipe_id)))
                    .execute(conn)
                    .await?;
                if labels.is_empty() {
                    return Ok(());
                }
                let rows: Vec<_> = labels
                    .iter()
                    .map(|label| {
                        (
                            $links::recipe_id.eq(recipe_id),
                            $links::$link_column.eq(label.id().get()),
                        )
                    })
                    .collect();
                diesel::insert_into($links::table)
                    .values(rows)
                    .execute(conn)
                    .await?;
                Ok(())
            }

            pub(crate) async fn load_for_recipe(
                conn: &mut AsyncPgConnection,
                recipe_id: i64,
            ) -> QueryResult<Vec<Label>> {
                let rows: Vec<LabelRow> = $links::table
                    .inner_join($table::table)
                    .filter($links::recipe_id.eq(recipe_id))
                    .select(($table::id, $table::user_id, $table::name))
                    .order_by($table::id.asc())
                    .load(conn)
                    .await?;
                labels_from_rows(rows)
            }
        }

        $(#[$meta])*
        #[derive(Clone)]
        pub struct $repo {
            pool: DbPool,
        }

        impl $repo {
            pub fn new(pool: DbPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait::async_trait]
        impl LabelRepository for $repo {
            async fn list_for_owner(
                &self,
                owner: &UserId,
            ) -> Result<Vec<Label>, LabelRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let rows: Vec<LabelRow> = $table::table
                    .filter($table::user_id.eq(*owner.as_uuid()))
                    .select(($table::id, $table::user_id, $table::name))
                    // `name` is declared `COLLATE "C"`: code-point order.
                    .order_by($table::name.desc())
                    .load(&mut conn)
                    .await
                    .map_err(|error| map_diesel_error($kind, error, None))?;
                labels_from_rows(rows).map_err(|error| map_diesel_error($kind, error, None))
            }

            async fn rename(
                &self,
                owner: &UserId,
                id: LabelId,
                name: &LabelName,
            ) -> Result<Option<Label>, LabelRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<LabelRow> = diesel::update(
                    $table::table
                        .filter($table::id.eq(id.get()))
                        .filter($table::user_id.eq(*owner.as_uuid())),
                )
                .set($table::name.eq(AsRef::<str>::as_ref(name)))
                .returning(($table::id, $table::user_id, $table::name))
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|error| map_diesel_error($kind, error, Some(name)))?;
                row.map(LabelRow::into_label)
                    .transpose()
                    .map_err(|error| map_diesel_error($kind, error, None))
            }

            async fn delete(
                &self,
                owner: &UserId,
                id: LabelId,
            ) -> Result<bool, LabelRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let removed = diesel::delete(
                    $table::table
                        .filter($table::id.eq(id.get()))
                        .filter($table::user_id.eq(*owner.as_uuid())),
                )
                .execute(&mut conn)
                .await
                .map_err(|error| map_diesel_error($kind, error, None))?;
                Ok(removed > 0)
            }
        }
    };
}

pub(crate) use diesel_label_store;
