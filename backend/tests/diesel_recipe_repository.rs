//! Integration tests for the Diesel recipe and label adapters against
//! embedded PostgreSQL.
//!
//! Each test provisions a temporary database, applies the embedded
//! migrations and drives the repositories through their ports. A shared
//! Tokio runtime in the context keeps the tests synchronous.

use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use postgres::{Client, NoTls};
use recipe_api::domain::ports::{LabelRepository, LabelRepositoryError, RecipeRepository};
use recipe_api::domain::{
    Label, LabelChange, LabelId, LabelName, LabelSelection, Price, Recipe, RecipeChanges,
    RecipeDraft, RecipeFields, RecipeId, RecipeLink, RecipeTitle, TimeMinutes, UserId,
};
use recipe_api::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselRecipeRepository, DieselTagRepository, PoolConfig,
    run_pending_migrations,
};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{format_postgres_error, handle_cluster_setup_failure};

struct TestContext {
    runtime: Runtime,
    recipes: DieselRecipeRepository,
    tags: DieselTagRepository,
    ingredients: DieselIngredientRepository,
    database_url: String,
    owner: UserId,
    stranger: UserId,
    _database: TemporaryDatabase,
    _cluster: TestCluster,
}

impl TestContext {
    fn client(&self) -> Client {
        Client::connect(&self.database_url, NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
    }

    fn execute(&self, sql: &str) {
        self.client()
            .batch_execute(sql)
            .unwrap_or_else(|err| panic!("execute: {}", format_postgres_error(&err)));
    }

    /// Rows in `table` named `name` for `owner`.
    fn label_rows(&self, table: &str, owner: &UserId, name: &str) -> i64 {
        let sql = format!("SELECT count(*) FROM {table} WHERE user_id = $1 AND name = $2");
        self.client()
            .query_one(sql.as_str(), &[owner.as_uuid(), &name])
            .unwrap_or_else(|err| panic!("count: {}", format_postgres_error(&err)))
            .get(0)
    }

    fn recipe_rows(&self, owner: &UserId) -> i64 {
        self.client()
            .query_one(
                "SELECT count(*) FROM recipes WHERE user_id = $1",
                &[owner.as_uuid()],
            )
            .unwrap_or_else(|err| panic!("count: {}", format_postgres_error(&err)))
            .get(0)
    }

    fn create(&self, owner: &UserId, draft: &RecipeDraft) -> Recipe {
        self.runtime
            .block_on(self.recipes.create(owner, draft))
            .expect("create recipe")
    }
}

fn seed_user(url: &str, id: &UserId, email: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .execute(
            "INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)",
            &[id.as_uuid(), &email, &"$argon2id$unused"],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(())
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database = cluster
        .temporary_database(format!("recipes_{}", Uuid::new_v4().simple()).as_str())
        .map_err(|err| format!("{err:?}"))?;
    let database_url = database.url().to_string();

    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let owner = UserId::random();
    let stranger = UserId::random();
    seed_user(&database_url, &owner, "cook@example.com")?;
    seed_user(&database_url, &stranger, "other@example.com")?;

    let config = PoolConfig::new(&database_url).with_max_size(2);
    let pool = runtime
        .block_on(DbPool::connect(&config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        recipes: DieselRecipeRepository::new(pool.clone()),
        tags: DieselTagRepository::new(pool.clone()),
        ingredients: DieselIngredientRepository::new(pool),
        database_url,
        owner,
        stranger,
        _database: database,
        _cluster: cluster,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn selection(names: &[&str]) -> LabelSelection {
    LabelSelection::from_names(
        names
            .iter()
            .map(|name| LabelName::new(name).expect("valid label name")),
    )
}

fn draft(title: &str, tags: &[&str], ingredients: &[&str]) -> RecipeDraft {
    RecipeDraft {
        fields: RecipeFields {
            title: RecipeTitle::new(title).expect("valid title"),
            time_minutes: TimeMinutes::new(10).expect("valid time"),
            price: Price::from_cents(500).expect("valid price"),
            description: String::new(),
            link: RecipeLink::default(),
        },
        tags: selection(tags),
        ingredients: selection(ingredients),
    }
}

fn names(labels: &[Label]) -> Vec<String> {
    labels.iter().map(ToString::to_string).collect()
}

fn id_of(labels: &[Label], name: &str) -> LabelId {
    labels
        .iter()
        .find(|label| label.to_string() == name)
        .map(Label::id)
        .unwrap_or_else(|| panic!("label {name} attached"))
}

#[rstest]
fn existing_labels_are_reused_and_missing_ones_created(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: existing_labels_are_reused_and_missing_ones_created skipped");
        return;
    };
    let owner = context.owner.clone();

    let first = context.create(&owner, &draft("Curry", &["Thai"], &["Rice"]));
    let second = context.create(&owner, &draft("Soup", &["Thai", "Quick"], &["Rice"]));

    assert_eq!(names(second.tags()), ["Thai", "Quick"]);
    assert_eq!(second.tags()[0].id(), first.tags()[0].id());
    assert_ne!(second.tags()[1].id(), first.tags()[0].id());
    assert_eq!(second.ingredients()[0].id(), first.ingredients()[0].id());
    assert_eq!(context.label_rows("tags", &owner, "Thai"), 1);
    assert_eq!(context.label_rows("tags", &owner, "Quick"), 1);
    assert_eq!(context.label_rows("ingredients", &owner, "Rice"), 1);
}

#[rstest]
fn labels_are_scoped_per_user(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: labels_are_scoped_per_user skipped");
        return;
    };

    let mine = context.create(&context.owner, &draft("Curry", &["Thai"], &[]));
    let theirs = context.create(&context.stranger, &draft("Noodles", &["Thai"], &[]));

    assert_ne!(mine.tags()[0].id(), theirs.tags()[0].id());
    assert_eq!(context.label_rows("tags", &context.owner, "Thai"), 1);
    assert_eq!(context.label_rows("tags", &context.stranger, "Thai"), 1);
    let listed = context
        .runtime
        .block_on(context.tags.list_for_owner(&context.owner))
        .expect("list tags");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].owner(), &context.owner);
}

#[rstest]
fn concurrent_writers_share_one_label_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_writers_share_one_label_row skipped");
        return;
    };
    let owner = context.owner.clone();
    let left = draft("Curry", &["Thai"], &["Rice"]);
    let right = draft("Salad", &["Thai"], &["Rice"]);

    let (left, right) = context.runtime.block_on(async {
        tokio::join!(
            context.recipes.create(&owner, &left),
            context.recipes.create(&owner, &right)
        )
    });
    let left = left.expect("first writer");
    let right = right.expect("second writer");

    assert_eq!(left.tags()[0].id(), right.tags()[0].id());
    assert_eq!(context.label_rows("tags", &owner, "Thai"), 1);
    assert_eq!(context.label_rows("ingredients", &owner, "Rice"), 1);
}

#[rstest]
fn empty_replacement_clears_links_but_keeps_labels(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: empty_replacement_clears_links_but_keeps_labels skipped");
        return;
    };
    let owner = context.owner.clone();
    let recipe = context.create(&owner, &draft("Curry", &["Thai", "Dinner"], &["Rice"]));

    let changes = RecipeChanges {
        tags: LabelChange::Replace(LabelSelection::empty()),
        ..RecipeChanges::default()
    };
    let updated = context
        .runtime
        .block_on(context.recipes.update(&owner, recipe.id(), &changes))
        .expect("update")
        .expect("owned recipe");

    assert!(updated.tags().is_empty());
    assert_eq!(names(updated.ingredients()), ["Rice"]);
    assert_eq!(context.label_rows("tags", &owner, "Thai"), 1);

    let reloaded = context
        .runtime
        .block_on(context.recipes.find_for_owner(&owner, recipe.id()))
        .expect("find")
        .expect("owned recipe");
    assert!(reloaded.tags().is_empty());
}

#[rstest]
fn other_users_recipes_are_invisible(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: other_users_recipes_are_invisible skipped");
        return;
    };
    let recipe = context.create(&context.owner, &draft("Curry", &["Thai"], &[]));
    let stranger = context.stranger.clone();
    let changes = RecipeChanges {
        title: Some(RecipeTitle::new("Stolen").expect("valid title")),
        ..RecipeChanges::default()
    };

    let (found, updated, deleted) = context.runtime.block_on(async {
        let found = context.recipes.find_for_owner(&stranger, recipe.id()).await;
        let updated = context.recipes.update(&stranger, recipe.id(), &changes).await;
        let deleted = context.recipes.delete(&stranger, recipe.id()).await;
        (found, updated, deleted)
    });
    assert!(found.expect("find").is_none());
    assert!(updated.expect("update").is_none());
    assert!(!deleted.expect("delete"));

    let intact = context
        .runtime
        .block_on(context.recipes.find_for_owner(&context.owner, recipe.id()))
        .expect("find")
        .expect("owned recipe");
    assert_eq!(intact.title(), &RecipeTitle::new("Curry").expect("valid title"));
    assert!(
        context
            .runtime
            .block_on(context.recipes.find_for_owner(&context.owner, RecipeId::new(9_999)))
            .expect("find")
            .is_none()
    );
}

const FAIL_INGREDIENT_LINKS: &str = "
    CREATE FUNCTION reject_ingredient_link() RETURNS trigger AS $$
    BEGIN
        RAISE EXCEPTION 'ingredient links disabled';
    END;
    $$ LANGUAGE plpgsql;
    CREATE TRIGGER reject_ingredient_link
        BEFORE INSERT ON recipe_ingredients
        FOR EACH ROW EXECUTE FUNCTION reject_ingredient_link();
";

#[rstest]
fn failed_create_leaves_no_rows_behind(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: failed_create_leaves_no_rows_behind skipped");
        return;
    };
    context.execute(FAIL_INGREDIENT_LINKS);
    let owner = context.owner.clone();

    let result = context
        .runtime
        .block_on(context.recipes.create(&owner, &draft("Curry", &["Thai"], &["Rice"])));

    assert!(result.is_err());
    assert_eq!(context.recipe_rows(&owner), 0);
    assert_eq!(context.label_rows("tags", &owner, "Thai"), 0);
    assert_eq!(context.label_rows("ingredients", &owner, "Rice"), 0);
}

#[rstest]
fn failed_update_keeps_previous_state(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: failed_update_keeps_previous_state skipped");
        return;
    };
    let owner = context.owner.clone();
    let recipe = context.create(&owner, &draft("Curry", &["Thai"], &[]));
    context.execute(FAIL_INGREDIENT_LINKS);

    let changes = RecipeChanges {
        title: Some(RecipeTitle::new("Green curry").expect("valid title")),
        tags: LabelChange::Replace(selection(&["Spicy"])),
        ingredients: LabelChange::Replace(selection(&["Basil"])),
        ..RecipeChanges::default()
    };
    let result = context
        .runtime
        .block_on(context.recipes.update(&owner, recipe.id(), &changes));
    assert!(result.is_err());

    let reloaded = context
        .runtime
        .block_on(context.recipes.find_for_owner(&owner, recipe.id()))
        .expect("find")
        .expect("owned recipe");
    assert_eq!(reloaded.title(), &RecipeTitle::new("Curry").expect("valid title"));
    assert_eq!(names(reloaded.tags()), ["Thai"]);
    assert_eq!(context.label_rows("tags", &owner, "Spicy"), 0);
}

#[rstest]
fn rename_to_taken_name_conflicts(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: rename_to_taken_name_conflicts skipped");
        return;
    };
    let owner = context.owner.clone();
    let recipe = context.create(&owner, &draft("Curry", &["Dinner", "Lunch"], &[]));
    let dinner = id_of(recipe.tags(), "Dinner");
    let lunch = LabelName::new("Lunch").expect("valid name");

    let result = context
        .runtime
        .block_on(context.tags.rename(&owner, dinner, &lunch));
    assert!(matches!(result, Err(LabelRepositoryError::DuplicateName { .. })));

    let supper = LabelName::new("Supper").expect("valid name");
    let renamed = context
        .runtime
        .block_on(context.tags.rename(&owner, dinner, &supper))
        .expect("rename")
        .expect("owned tag");
    assert_eq!(renamed.to_string(), "Supper");
    assert!(
        context
            .runtime
            .block_on(context.tags.rename(&context.stranger, dinner, &supper))
            .expect("rename")
            .is_none()
    );
}

#[rstest]
fn deleting_a_label_detaches_it_from_recipes(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_label_detaches_it_from_recipes skipped");
        return;
    };
    let owner = context.owner.clone();
    let recipe = context.create(&owner, &draft("Curry", &[], &["Rice", "Chilli"]));
    let rice = id_of(recipe.ingredients(), "Rice");

    assert!(
        !context
            .runtime
            .block_on(context.ingredients.delete(&context.stranger, rice))
            .expect("delete")
    );
    assert!(
        context
            .runtime
            .block_on(context.ingredients.delete(&owner, rice))
            .expect("delete")
    );
    assert!(
        !context
            .runtime
            .block_on(context.ingredients.delete(&owner, rice))
            .expect("delete again")
    );

    let reloaded = context
        .runtime
        .block_on(context.recipes.find_for_owner(&owner, recipe.id()))
        .expect("find")
        .expect("owned recipe");
    assert_eq!(names(reloaded.ingredients()), ["Chilli"]);
}

#[rstest]
fn labels_list_in_descending_code_point_order(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: labels_list_in_descending_code_point_order skipped");
        return;
    };
    let owner = context.owner.clone();
    context.create(&owner, &draft("Pie", &["apple", "Kale", "Zest", "banana"], &[]));

    let listed = context
        .runtime
        .block_on(context.tags.list_for_owner(&owner))
        .expect("list tags");
    assert_eq!(names(&listed), ["banana", "apple", "Zest", "Kale"]);
}
