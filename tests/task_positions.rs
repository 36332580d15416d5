use chrono::{DateTime, FixedOffset, TimeZone};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use tasklist_server::{
    config::DatabaseConfig,
    db::{connection, dao::NewTask, entities::task},
    error::AppError,
    services::ServiceContext,
};

const TEAMS: [&str; 6] = [
    "Argentina",
    "France",
    "Croatia",
    "Morocco",
    "England",
    "Portugal",
];

/// A private in-memory store. One pooled connection, since every SQLite
/// memory connection is its own database.
async fn sqlite() -> DatabaseConnection {
    let mut cfg = DatabaseConfig::new("sqlite::memory:");
    cfg.max_connections = 1;
    cfg.min_idle = 1;
    connection::connect(&cfg).await.expect("connect to sqlite")
}

async fn postgres() -> DatabaseConnection {
    let _ = dotenvy::dotenv();
    let url = std::env::var("APP_DATABASE__URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("APP_DATABASE__URL or DATABASE_URL must be set");
    connection::connect(&DatabaseConfig::new(url))
        .await
        .expect("connect to database")
}

fn ts(day: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .expect("offset should be valid")
        .with_ymd_and_hms(2026, 1, day, 0, 0, 0)
        .single()
        .expect("timestamp should be valid")
}

/// Creates a fresh list holding `titles` at positions `1..=N`.
async fn list_with(services: &ServiceContext, titles: &[&str]) -> (Uuid, Vec<task::Model>) {
    let actor = Uuid::new_v4();
    let list = services
        .list()
        .create_list(&format!("World Cup {}", Uuid::new_v4()), actor)
        .await
        .expect("create list");
    let mut tasks = Vec::new();
    for title in titles {
        let task = services
            .task()
            .create_task(NewTask {
                list_id: list.list.list_id,
                title: title.to_string(),
                description: None,
                created_user_id: actor,
            })
            .await
            .expect("create task");
        tasks.push(task);
    }
    (list.list.list_id, tasks)
}

/// `(title, position)` ordered by ascending position.
async fn order(services: &ServiceContext, list_id: &Uuid) -> Vec<(String, i32)> {
    let mut tasks = services
        .task()
        .list_tasks(Some(list_id))
        .await
        .expect("list tasks");
    tasks.reverse();
    tasks
        .into_iter()
        .map(|task| (task.title, task.position))
        .collect()
}

fn ranked(titles: &[&str]) -> Vec<(String, i32)> {
    titles
        .iter()
        .zip(1..)
        .map(|(title, position)| (title.to_string(), position))
        .collect()
}

async fn move_first_to_last_and_back(services: &ServiceContext) {
    let (list_id, tasks) = list_with(services, &TEAMS).await;
    assert_eq!(order(services, &list_id).await, ranked(&TEAMS));
    let argentina = tasks[0].task_id;

    let affected = services
        .task()
        .move_task(&argentina, 6, Uuid::new_v4())
        .await
        .expect("move forward");
    assert_eq!(affected, 6);
    assert_eq!(
        order(services, &list_id).await,
        ranked(&["France", "Croatia", "Morocco", "England", "Portugal", "Argentina"])
    );

    let affected = services
        .task()
        .move_task(&argentina, 1, Uuid::new_v4())
        .await
        .expect("move backward");
    assert_eq!(affected, 6);
    assert_eq!(order(services, &list_id).await, ranked(&TEAMS));

    services.list().delete_list(&list_id).await.expect("cleanup");
}

async fn move_within_the_middle_touches_only_the_span(services: &ServiceContext) {
    let (list_id, tasks) = list_with(services, &TEAMS).await;
    let france = tasks[1].task_id;

    let affected = services
        .task()
        .move_task(&france, 5, Uuid::new_v4())
        .await
        .expect("move");
    assert_eq!(affected, 4);
    assert_eq!(
        order(services, &list_id).await,
        ranked(&["Argentina", "Croatia", "Morocco", "England", "France", "Portugal"])
    );

    let after = services
        .task()
        .list_tasks(Some(&list_id))
        .await
        .expect("list tasks");
    for untouched in [&tasks[0], &tasks[5]] {
        let now = after
            .iter()
            .find(|task| task.task_id == untouched.task_id)
            .expect("task still present");
        assert_eq!(now.updated_at, untouched.updated_at, "{}", untouched.title);
    }

    services.list().delete_list(&list_id).await.expect("cleanup");
}

async fn move_to_current_position_changes_nothing(services: &ServiceContext) {
    let (list_id, tasks) = list_with(services, &TEAMS).await;

    let affected = services
        .task()
        .move_task(&tasks[2].task_id, 3, Uuid::new_v4())
        .await
        .expect("move");
    assert_eq!(affected, 0);

    let mut after = services
        .task()
        .list_tasks(Some(&list_id))
        .await
        .expect("list tasks");
    after.reverse();
    let stamps: Vec<_> = after.iter().map(|task| task.updated_at).collect();
    let before: Vec<_> = tasks.iter().map(|task| task.updated_at).collect();
    assert_eq!(stamps, before);

    services.list().delete_list(&list_id).await.expect("cleanup");
}

async fn out_of_range_move_leaves_the_list_alone(services: &ServiceContext) {
    let (list_id, tasks) = list_with(services, &TEAMS).await;

    let err = services
        .task()
        .move_task(&tasks[0].task_id, 7, Uuid::new_v4())
        .await
        .expect_err("position 7 does not exist");
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(order(services, &list_id).await, ranked(&TEAMS));

    services.list().delete_list(&list_id).await.expect("cleanup");
}

async fn create_appends_after_the_highest_position(services: &ServiceContext) {
    let (list_id, tasks) = list_with(services, &["Jogging", "English Class"]).await;
    assert_eq!(tasks[0].position, 1);
    assert_eq!(tasks[1].position, 2);

    services
        .task()
        .delete_task(&tasks[0].task_id)
        .await
        .expect("delete");
    let appended = services
        .task()
        .create_task(NewTask {
            list_id,
            title: "Tech Articles".to_string(),
            description: Some("Read tech articles for an hour.".to_string()),
            created_user_id: Uuid::new_v4(),
        })
        .await
        .expect("create task");
    assert_eq!(appended.position, 3);
    assert!(!appended.completed);

    services.list().delete_list(&list_id).await.expect("cleanup");
}

async fn deleting_a_list_removes_its_tasks(services: &ServiceContext) {
    let (list_id, _) = list_with(services, &TEAMS).await;

    assert!(services.list().delete_list(&list_id).await.expect("delete"));
    assert!(
        services
            .task()
            .list_tasks(Some(&list_id))
            .await
            .expect("list tasks")
            .is_empty()
    );
    assert!(services.list().get_list(&list_id).await.expect("get").is_none());
    assert!(!services.list().delete_list(&list_id).await.expect("delete again"));
}

async fn unknown_task_move_is_a_no_op(services: &ServiceContext) {
    let affected = services
        .task()
        .move_task(&Uuid::new_v4(), 2, Uuid::new_v4())
        .await
        .expect("move");
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn sqlite_move_first_to_last_and_back() {
    let db = sqlite().await;
    move_first_to_last_and_back(&ServiceContext::new(&db)).await;
}

#[tokio::test]
async fn sqlite_move_within_the_middle_touches_only_the_span() {
    let db = sqlite().await;
    move_within_the_middle_touches_only_the_span(&ServiceContext::new(&db)).await;
}

#[tokio::test]
async fn sqlite_move_to_current_position_changes_nothing() {
    let db = sqlite().await;
    move_to_current_position_changes_nothing(&ServiceContext::new(&db)).await;
}

#[tokio::test]
async fn sqlite_out_of_range_move_leaves_the_list_alone() {
    let db = sqlite().await;
    out_of_range_move_leaves_the_list_alone(&ServiceContext::new(&db)).await;
}

#[tokio::test]
async fn sqlite_create_appends_after_the_highest_position() {
    let db = sqlite().await;
    create_appends_after_the_highest_position(&ServiceContext::new(&db)).await;
}

#[tokio::test]
async fn sqlite_deleting_a_list_removes_its_tasks() {
    let db = sqlite().await;
    deleting_a_list_removes_its_tasks(&ServiceContext::new(&db)).await;
}

#[tokio::test]
async fn sqlite_unknown_task_move_is_a_no_op() {
    let db = sqlite().await;
    unknown_task_move_is_a_no_op(&ServiceContext::new(&db)).await;
}

#[tokio::test]
async fn sqlite_task_for_unknown_list_is_rejected() {
    let db = sqlite().await;
    let services = ServiceContext::new(&db);

    let err = services
        .task()
        .create_task(NewTask {
            list_id: Uuid::new_v4(),
            title: "Orphan".to_string(),
            description: None,
            created_user_id: Uuid::new_v4(),
        })
        .await
        .expect_err("list does not exist");
    assert!(matches!(err, AppError::BadRequest(_)), "{err:?}");
}

#[tokio::test]
async fn sqlite_shared_positions_fall_back_to_recency_then_title() {
    let db = sqlite().await;
    let services = ServiceContext::new(&db);
    let (list_id, _) = list_with(&services, &[]).await;
    let actor = Uuid::new_v4();

    // two appends racing on the same maximum can leave positions shared
    for (title, position, day) in [
        ("Alpha", 1, 1),
        ("Bravo", 1, 2),
        ("Charlie", 1, 2),
        ("Delta", 2, 1),
    ] {
        task::ActiveModel {
            task_id: Set(Uuid::new_v4()),
            list_id: Set(list_id),
            title: Set(title.to_string()),
            description: Set(None),
            position: Set(position),
            completed: Set(false),
            created_user_id: Set(actor),
            updated_user_id: Set(actor),
            created_at: Set(ts(day)),
            updated_at: Set(ts(day)),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("insert task");
    }

    let titles: Vec<String> = services
        .task()
        .list_tasks(Some(&list_id))
        .await
        .expect("list tasks")
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["Delta", "Charlie", "Bravo", "Alpha"]);

    let lists = services.list().list_lists().await.expect("list lists");
    let grouped: Vec<&str> = lists[0].tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(grouped, vec!["Delta", "Charlie", "Bravo", "Alpha"]);
}

#[tokio::test]
#[ignore = "requires Postgres database"]
async fn postgres_position_scenarios() {
    let db = postgres().await;
    let services = ServiceContext::new(&db);

    move_first_to_last_and_back(&services).await;
    move_within_the_middle_touches_only_the_span(&services).await;
    move_to_current_position_changes_nothing(&services).await;
    out_of_range_move_leaves_the_list_alone(&services).await;
    create_appends_after_the_highest_position(&services).await;
    deleting_a_list_removes_its_tasks(&services).await;
    unknown_task_move_is_a_no_op(&services).await;
}
