use crate::config::DatabaseConfig;
use crate::db::models::DbItem;
use crate::db::patch::{DbPatchable, ItemPatch};
use crate::db::schema::{ITEM_COLUMNS, SQLITE_INIT};
use crate::error::ItemdeskError;
use chrono::Utc;
use itemdesk_schema::NewItem;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert an item and return the stored row.
    Create(NewItem, RpcReplyPort<Result<DbItem, ItemdeskError>>),

    /// Patch an item by id and return the stored row.
    Patch(ItemPatch, RpcReplyPort<Result<DbItem, ItemdeskError>>),

    /// List every item, newest first.
    List(RpcReplyPort<Result<Vec<DbItem>, ItemdeskError>>),

    /// Get item by id.
    GetById(i64, RpcReplyPort<Result<DbItem, ItemdeskError>>),

    /// Delete item by id.
    Delete(i64, RpcReplyPort<Result<(), ItemdeskError>>),

    /// Round-trip a trivial query; replies with the database clock.
    Ping(RpcReplyPort<Result<String, ItemdeskError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn create(&self, item: NewItem) -> Result<DbItem, ItemdeskError> {
        ractor::call!(self.actor, DbActorMessage::Create, item)
            .map_err(|e| ItemdeskError::RactorError(format!("DbActor Create RPC failed: {e}")))?
    }

    pub async fn patch(&self, patch: ItemPatch) -> Result<DbItem, ItemdeskError> {
        ractor::call!(self.actor, DbActorMessage::Patch, patch)
            .map_err(|e| ItemdeskError::RactorError(format!("DbActor Patch RPC failed: {e}")))?
    }

    pub async fn list(&self) -> Result<Vec<DbItem>, ItemdeskError> {
        ractor::call!(self.actor, DbActorMessage::List)
            .map_err(|e| ItemdeskError::RactorError(format!("DbActor List RPC failed: {e}")))?
    }

    pub async fn get_by_id(&self, id: i64) -> Result<DbItem, ItemdeskError> {
        ractor::call!(self.actor, DbActorMessage::GetById, id)
            .map_err(|e| ItemdeskError::RactorError(format!("DbActor GetById RPC failed: {e}")))?
    }

    pub async fn delete(&self, id: i64) -> Result<(), ItemdeskError> {
        ractor::call!(self.actor, DbActorMessage::Delete, id)
            .map_err(|e| ItemdeskError::RactorError(format!("DbActor Delete RPC failed: {e}")))?
    }

    pub async fn ping(&self) -> Result<String, ItemdeskError> {
        ractor::call!(self.actor, DbActorMessage::Ping)
            .map_err(|e| ItemdeskError::RactorError(format!("DbActor Ping RPC failed: {e}")))?
    }

    /// Stop the actor; the pool is closed in `post_stop`.
    pub fn shutdown(&self) {
        self.actor.stop(Some("shutdown".to_string()));
    }
}

pub struct DbActorArgs {
    pub database_url: String,
    pub database: DatabaseConfig,
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = DbActorArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(args.database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(args.database.busy_timeout())
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(args.database.max_connections)
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!(
            max_connections = args.database.max_connections,
            busy_timeout_secs = args.database.busy_timeout_secs,
            "DbActor initialized"
        );
        Ok(DbActorState { pool })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.pool.close().await;
        info!("DbActor stopped, pool closed");
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::Create(item, reply) => {
                let res = self.create_item(&state.pool, item).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Patch(patch, reply) => {
                let res = patch.apply_patch(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::List(reply) => {
                let res = self.list_items(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::GetById(id, reply) => {
                let res = self.get_item(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Delete(id, reply) => {
                let res = self.delete_item(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Ping(reply) => {
                let res = self.ping(&state.pool).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn create_item(&self, pool: &SqlitePool, item: NewItem) -> Result<DbItem, ItemdeskError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, DbItem>(&format!(
            r#"
            INSERT INTO items (title, description, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(item.title)
        .bind(item.description)
        .bind(item.status.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        debug!(id = row.id, status = %row.status, "db item created");
        Ok(row)
    }

    async fn list_items(&self, pool: &SqlitePool) -> Result<Vec<DbItem>, ItemdeskError> {
        let rows = sqlx::query_as::<_, DbItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM items
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn get_item(&self, pool: &SqlitePool, id: i64) -> Result<DbItem, ItemdeskError> {
        sqlx::query_as::<_, DbItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM items
            WHERE id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ItemdeskError::not_found(id))
    }

    async fn delete_item(&self, pool: &SqlitePool, id: i64) -> Result<(), ItemdeskError> {
        let deleted: Option<i64> = sqlx::query_scalar("DELETE FROM items WHERE id = ? RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        debug!(id, deleted = deleted.is_some(), "db item delete");
        deleted.map(|_| ()).ok_or_else(|| ItemdeskError::not_found(id))
    }

    async fn ping(&self, pool: &SqlitePool) -> Result<String, ItemdeskError> {
        let now: String = sqlx::query_scalar("SELECT CURRENT_TIMESTAMP")
            .fetch_one(pool)
            .await?;
        Ok(now)
    }
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(
    database_url: &str,
    database: &DatabaseConfig,
) -> Result<DbActorHandle, ItemdeskError> {
    let args = DbActorArgs {
        database_url: database_url.to_string(),
        database: database.clone(),
    };
    // Unnamed: the ractor registry is process-global and several pools may coexist.
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, args)
        .await
        .map_err(|e| ItemdeskError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), ItemdeskError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
