use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::models::leaderboard::LeaderboardEntry;

const COLLECTION: &str = "leaderboards";

#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    async fn fetch_all(&self) -> anyhow::Result<Vec<LeaderboardEntry>>;

    async fn fetch_one(&self, id: ObjectId) -> anyhow::Result<Option<LeaderboardEntry>>;

    /// Inserts `entry` and returns it with its assigned id.
    async fn create(&self, entry: LeaderboardEntry) -> anyhow::Result<LeaderboardEntry>;

    /// Replaces the whole stored document. Returns false if it no longer exists.
    async fn replace(&self, entry: &LeaderboardEntry) -> anyhow::Result<bool>;

    async fn delete(&self, id: ObjectId) -> anyhow::Result<Option<LeaderboardEntry>>;

    async fn ping(&self) -> anyhow::Result<()>;
}

pub struct LeaderboardsRepository {
    database: Database,
    collection: Collection<LeaderboardEntry>,
}

impl LeaderboardsRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl LeaderboardStore for LeaderboardsRepository {
    async fn fetch_all(&self) -> anyhow::Result<Vec<LeaderboardEntry>> {
        let entries: Vec<LeaderboardEntry> = self
            .collection
            .find(doc! {})
            .sort(doc! { "rankScore": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(entries)
    }

    async fn fetch_one(&self, id: ObjectId) -> anyhow::Result<Option<LeaderboardEntry>> {
        let entry = self.collection.find_one(doc! { "_id": id }).await?;

        Ok(entry)
    }

    async fn create(&self, mut entry: LeaderboardEntry) -> anyhow::Result<LeaderboardEntry> {
        let id = ObjectId::new();
        entry.id = Some(id);

        self.collection.insert_one(&entry).await?;

        Ok(entry)
    }

    async fn replace(&self, entry: &LeaderboardEntry) -> anyhow::Result<bool> {
        let Some(id) = entry.id else {
            anyhow::bail!("cannot replace an entry without an id");
        };

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, entry)
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<Option<LeaderboardEntry>> {
        let entry = self
            .collection
            .find_one_and_delete(doc! { "_id": id })
            .await?;

        Ok(entry)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;

        Ok(())
    }
}
