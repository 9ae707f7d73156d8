//! Provisions the documents the service expects to exist: one menu and one
//! opening hours document per weekday, the food pantry notice, and the
//! bearer token the mutating endpoints check against. Existing documents are
//! left alone, so reruns are safe; only `--token-key` overwrites.

use clap::Parser;

use canteen::config::Config;
use canteen::database::{Collections, RedisStore};
use canteen::error::AppError;
use canteen::info::{FOOD_PANTRY, TOKEN_KEY};
use canteen::menus::WEEK_DAYS;
use canteen::models::{Menu, MiscDocument, OpeningHours};

const DEFAULT_OPENING: &str = "09:00";
const DEFAULT_CLOSING: &str = "15:00";
const DEFAULT_PANTRY_NOTICE: &str =
    "The food pantry is open to all students during regular opening hours.";

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Bearer token to store as the TokenKey settings document. Replaces an
    /// existing key.
    #[arg(long)]
    token_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let config = Config::load();
    let store = RedisStore::connect(&config.redis_url).await;

    let mut created = 0;

    for day in WEEK_DAYS {
        if store
            .find_one_by_field::<Menu>("day", day)
            .await?
            .is_none()
        {
            store
                .insert(Menu {
                    id: String::new(),
                    day: day.to_string(),
                    items: Vec::new(),
                })
                .await?;

            println!("Created menu for {day}");
            created += 1;
        }

        if store
            .find_one_by_field::<OpeningHours>("day", day)
            .await?
            .is_none()
        {
            store
                .insert(OpeningHours {
                    id: String::new(),
                    day: day.to_string(),
                    opening_time: DEFAULT_OPENING.to_string(),
                    closing_time: DEFAULT_CLOSING.to_string(),
                })
                .await?;

            println!("Created opening hours for {day}");
            created += 1;
        }
    }

    if store
        .find_one_by_field::<MiscDocument>("documentName", FOOD_PANTRY)
        .await?
        .is_none()
    {
        store
            .insert(MiscDocument {
                id: String::new(),
                document_name: FOOD_PANTRY.to_string(),
                information: DEFAULT_PANTRY_NOTICE.to_string(),
            })
            .await?;

        println!("Created {FOOD_PANTRY} document");
        created += 1;
    }

    if let Some(token_key) = args.token_key {
        match store
            .find_one_by_field::<MiscDocument>("documentName", TOKEN_KEY)
            .await?
        {
            Some(mut existing) => {
                existing.information = token_key;
                let id = existing.id.clone();
                store.replace_by_id(&id, existing).await?;

                println!("Replaced {TOKEN_KEY} document");
            }
            None => {
                store
                    .insert(MiscDocument {
                        id: String::new(),
                        document_name: TOKEN_KEY.to_string(),
                        information: token_key,
                    })
                    .await?;

                println!("Created {TOKEN_KEY} document");
                created += 1;
            }
        }
    }

    println!("\nSeeded {created} new document(s)");
    Ok(())
}
