use std::str::FromStr;

use chrono::{Duration, NaiveTime, Utc};
use clap::Parser;
use circl::{
    domain::{CheckInRequest, CreateAnnouncementRequest, CreateUserRequest, NewEvent},
    repository::{
        AnnouncementRepository, SqliteAnnouncementRepository,
        CheckInRepository, SqliteCheckInRepository,
        EventRepository, SqliteEventRepository,
        UserRepository, SqliteUserRepository,
    },
};
use fake::{
    faker::{internet::en::{SafeEmail, Username}, name::en::Name},
    Fake,
};
use rand::{seq::SliceRandom, Rng};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const EVENT_TYPES: &[&str] = &["Workshop", "Meeting", "Social", "Networking", "Pitch Night"];

/// Populate a Circl database with demo users, events, check-ins and announcements.
#[derive(Parser, Debug)]
#[command(name = "seed")]
struct Args {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://circl.db")]
    database_url: String,

    /// Number of users to create
    #[arg(long, default_value_t = 8)]
    users: usize,

    /// Number of events to create, spread around today
    #[arg(long, default_value_t = 10)]
    events: usize,

    /// Circle the demo announcements are posted to
    #[arg(long, default_value_t = 1)]
    circle_id: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let connect_options = SqliteConnectOptions::from_str(&args.database_url)?
        .create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    // Run migrations first
    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let user_repo = SqliteUserRepository::new(db_pool.clone());
    let event_repo = SqliteEventRepository::new(db_pool.clone());
    let checkin_repo = SqliteCheckInRepository::new(db_pool.clone());
    let announcement_repo = SqliteAnnouncementRepository::new(db_pool.clone());

    println!("👥 Creating users...");
    let mut users = Vec::with_capacity(args.users);
    for i in 0..args.users {
        let username: String = Username().fake();
        let user = user_repo.create(CreateUserRequest {
            username: format!("{}{}", username, i),
            name: Name().fake(),
            email: SafeEmail().fake(),
        }).await?;
        users.push(user);
    }
    println!("  ✅ Created {} users", users.len());

    println!("📅 Creating events...");
    let mut events = Vec::with_capacity(args.events);
    for plan in plan_events(args.events) {
        events.push(event_repo.create(plan).await?);
    }
    println!("  ✅ Created {} events", events.len());

    println!("📍 Recording check-ins...");
    let user_ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    let past_event_ids: Vec<i64> = events
        .iter()
        .filter(|e| e.date <= Utc::now())
        .map(|e| e.id)
        .collect();
    let pairs = plan_checkins(&user_ids, &past_event_ids);
    for (user_id, event_id) in &pairs {
        checkin_repo.create(CheckInRequest { user_id: *user_id, event_id: *event_id }).await?;
    }
    println!("  ✅ Recorded {} check-ins", pairs.len());

    if let Some(author) = users.first() {
        println!("📢 Creating announcements...");
        let announcements = [
            ("Welcome to the circle!", "Introduce yourself in the group chat and say hi."),
            ("Workshop this week", "Bring a laptop, we'll be pairing on pitch decks."),
            ("Points leaderboard", "Check in at events to climb the leaderboard."),
        ];
        for (title, content) in announcements {
            announcement_repo.create(CreateAnnouncementRequest {
                user_id: author.id,
                circle_id: args.circle_id,
                title: title.to_string(),
                content: content.to_string(),
            }).await?;
        }
        println!("  ✅ Created {} announcements in circle {}", announcements.len(), args.circle_id);
    }

    println!("\n✨ Database seeding complete!");

    Ok(())
}

fn plan_events(count: usize) -> Vec<NewEvent> {
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();
    let evening = NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN);

    (0..count)
        .map(|i| {
            let offset = rng.gen_range(-7..=21);
            let date = (today + Duration::days(offset)).and_time(evening).and_utc();
            let event_type = EVENT_TYPES.choose(&mut rng).copied().unwrap_or("Meeting");
            NewEvent {
                name: format!("{} #{}", event_type, i + 1),
                event_type: event_type.to_string(),
                date,
                points: rng.gen_range(1..=5) * 5,
                revenue: f64::from(rng.gen_range(0..=20i32) * 5),
            }
        })
        .collect()
}

fn plan_checkins(user_ids: &[i64], event_ids: &[i64]) -> Vec<(i64, i64)> {
    let mut rng = rand::thread_rng();
    let mut pairs = Vec::new();

    for &user_id in user_ids {
        let attended = rng.gen_range(0..=event_ids.len());
        for &event_id in event_ids.choose_multiple(&mut rng, attended) {
            pairs.push((user_id, event_id));
        }
    }

    pairs
}
