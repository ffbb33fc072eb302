//! Demo command - scripted walkthrough of every person operation.
//!
//! Steps run one after another. A failing step is logged and the walkthrough
//! moves on to the next one.

use serde::Serialize;
use tracing::{error, info, warn};

use common::AppResult;
use domain::{
    NewPerson, DEFAULT_QUERY_LIMIT, DEMO_EXTRA_FOOD, DEMO_QUERY_FOOD, DEMO_REMOVED_NAME,
    DEMO_UPDATED_AGE,
};

use crate::service::PersonService;

/// Execute the demo walkthrough
pub async fn execute(service: &dyn PersonService) -> AppResult<()> {
    let nader = NewPerson::new("Nader Zeyara")
        .with_age(30)
        .with_foods(["Pizza", "Pasta"]);
    let created = service.create_one(nader).await;
    let created_id = created.as_ref().ok().map(|person| person.id);
    report("create one", created);

    let family = vec![
        NewPerson::new("Tamer Zeyara")
            .with_age(35)
            .with_foods(["Burritos"]),
        NewPerson::new("Ahmad Zeyara")
            .with_age(28)
            .with_foods(["Pizza", "Burritos"]),
        NewPerson::new("Anas Zeyara")
            .with_age(32)
            .with_foods(["Pasta", "Burritos"]),
    ];
    report("create many", service.create_many(family).await);

    report("find by name", service.find_by_name("Tamer Zeyara").await);
    report(
        "find one by food",
        service.find_one_by_favorite_food("Pizza").await,
    );

    if let Some(id) = created_id {
        report("find by id", service.find_by_id(id).await);
        report(
            "add favorite food",
            service.add_favorite_food_and_save(id, DEMO_EXTRA_FOOD).await,
        );
    }

    report(
        "set age by name",
        service
            .set_age_by_name("Tamer Zeyara", DEMO_UPDATED_AGE)
            .await,
    );
    report(
        "delete all by name",
        service.delete_all_by_name(DEMO_REMOVED_NAME).await,
    );
    report(
        "query favorite food",
        service
            .query_favorite_food_sorted_limited(DEMO_QUERY_FOOD, DEFAULT_QUERY_LIMIT)
            .await,
    );

    Ok(())
}

/// Log the outcome of one step
fn report<T: Serialize>(step: &str, result: AppResult<T>) {
    match result {
        Ok(value) => match serde_json::to_string(&value) {
            Ok(json) => info!(step, result = %json, "Demo step finished"),
            Err(e) => warn!(step, error = %e, "Demo step finished, result not printable"),
        },
        Err(e) => error!(step, code = e.code(), error = %e, "Demo step failed"),
    }
}
