use mongodb::{Client, bson::doc};

/// Run `{ ping: 1 }` against the `admin` database.
pub async fn ping(client: &Client) -> Result<(), mongodb::error::Error> {
    client.database("admin").run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
