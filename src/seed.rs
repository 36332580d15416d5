//! Fixture lists for local development.

use tracing::info;
use uuid::Uuid;

use crate::{db::dao::NewTask, error::AppError, services::ServiceContext};

type Fixture = (&'static str, &'static [(&'static str, &'static str)]);

pub const FIXTURES: &[Fixture] = &[
    (
        "Top Programming Languages in 2022",
        &[
            (
                "JavaScript / TypeScript",
                "Jobs Found: 801K (~31%), Keywords: javascript, typescript, react, angular, vue, node.",
            ),
            ("Python", "Jobs Found: 515K (~20%), Keywords: python, django, flask."),
            ("Java", "Jobs Found: 443K (~17%), Keywords: java, spring."),
            ("C#", "Jobs Found: 305K (~12%), Keywords: c#, .net."),
            ("PHP", "Jobs Found: 226K (~9%), Keywords: php, laravel, wordpress."),
        ],
    ),
    (
        "Dream Destination",
        &[
            (
                "Bora Bora Island",
                "The Bora Bora island is one of the most popular islands in The Islands of Tahiti.",
            ),
            ("Maldives", "It lies southwest of Sri Lanka and India."),
            (
                "Tromso, Norway",
                "The one of the best places in the world to see the Northern Lights.",
            ),
            (
                "Switzerland",
                "A destination that many people dream about visiting for its romantic scenery",
            ),
            (
                "Hallstatt, Austria",
                "The picturesque little town of Hallstatt is one of the most beautiful places to visit in Austria",
            ),
        ],
    ),
    (
        "Daily Routine",
        &[
            ("English Class", "Take an English class for 30 min."),
            ("Tech Articles", "Read tech articles for an hour."),
            ("Practice Algorithm", "Practice 2-3 questions a day."),
            ("Work From Home", "Start from 10AM (8 hours)."),
            ("Jogging", "For an hour."),
        ],
    ),
    (
        "2022 Worldwide Box Office",
        &[
            ("Top Gun: Maverick", "$1,488,732,821"),
            ("Jurassic World: Dominion", "$1,001,136,080"),
            ("Doctor Strange in the Multiverse of Madness", "$955,775,804"),
            ("Minions: The Rise of Gru", "$939,433,210"),
            ("Black Panther: Wakanda Forever", "$772,662,471"),
        ],
    ),
    (
        "The Game Awards 2022",
        &[
            (
                "Game of the Year",
                "Elden Ring - FromSoftware / Bandai Namco Entertainment",
            ),
            (
                "Best Game Direction",
                "Elden Ring - FromSoftware / Bandai Namco Entertainment",
            ),
            (
                "Best Narrative",
                "God of War Ragnarök - Santa Monica Studio / Sony Interactive Entertainment",
            ),
            (
                "Best Art Direction",
                "Elden Ring - FromSoftware / Bandai Namco Entertainment",
            ),
            (
                "Best Independent Game",
                "Stray - BlueTwelve Studio / Annapurna Interactive",
            ),
        ],
    ),
    (
        "My Favorite Anime",
        &[
            ("Dragon Ball", ""),
            ("Saint Seiya", ""),
            ("Detective Conan", ""),
            ("Sword Art Online", ""),
            ("One Piece", ""),
        ],
    ),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub lists: usize,
    pub tasks: usize,
}

/// Inserts every fixture list, appending its tasks in fixture order so they
/// take positions `1..=N`.
pub async fn seed(services: &ServiceContext, actor: Uuid) -> Result<SeedSummary, AppError> {
    let lists = services.list();
    let tasks = services.task();
    let mut summary = SeedSummary::default();

    for (title, fixture_tasks) in FIXTURES {
        let created = lists.create_list(title, actor).await?;
        summary.lists += 1;

        for (task_title, description) in fixture_tasks.iter() {
            tasks
                .create_task(NewTask {
                    list_id: created.list.list_id,
                    title: task_title.to_string(),
                    description: (!description.is_empty()).then(|| description.to_string()),
                    created_user_id: actor,
                })
                .await?;
            summary.tasks += 1;
        }
    }

    info!(lists = summary.lists, tasks = summary.tasks, "seeded fixtures");
    Ok(summary)
}
