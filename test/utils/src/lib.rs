use std::env;

pub fn insta_snapshot<F: FnOnce()>(f: F) {
    let mut settings = insta::Settings::clone_current();
    let snapshot_path = env::current_dir().unwrap().join("./test/snapshots");
    settings.set_snapshot_path(snapshot_path);
    settings.bind(f);
}

pub fn upcoming_posts_fixture() -> &'static str {
    return r#"
{
    "status": "success",
    "posts": [
        {
            "id": 12,
            "scheduled_time": "2024-03-01T09:00:00",
            "content": "Three lessons from shipping our first Rust service.\n\n1. Types are documentation."
        },
        {
            "id": 13,
            "scheduled_time": "2024-03-04T17:30",
            "content": "We're hiring!"
        }
    ]
}
"#
    .trim();
}

pub fn dashboard_fixture() -> &'static str {
    return r#"
{
    "status": "success",
    "total_posts": 42,
    "scheduled_posts": 3,
    "engagement_rate": 4.5,
    "top_tone": "storytelling",
    "recent_posts": [
        { "id": 1, "content": "Hello" }
    ],
    "last_published": null
}
"#
    .trim();
}
