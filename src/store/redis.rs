//! RedisAI implementation of the serving-store client.
//!
//! Speaks the RedisAI module command set over a synchronous connection:
//! `AI.MODELSET`, `AI.MODELDEL`, `AI.MODELGET <key> META` and
//! `AI._MODELSCAN`. Connection parameters come from [`StoreConfig`];
//! timeouts and authentication are whatever the connection URL specifies.

use redis::{ErrorKind, RedisError};
use tracing::debug;

use super::{ModelMeta, ModelStore, PublishRequest, StoreError};
use crate::config::StoreConfig;

pub struct RedisModelStore {
    conn: redis::Connection,
}

impl RedisModelStore {
    /// Opens a connection to the store and probes it with `PING`.
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = redis::Client::open(config.url()).map_err(StoreError::new)?;
        let mut conn = client.get_connection().map_err(StoreError::new)?;
        redis::cmd("PING")
            .query::<String>(&mut conn)
            .map_err(StoreError::new)?;
        debug!(host = %config.host, port = config.port, "connected to serving store");
        Ok(Self { conn })
    }
}

/// Whether the server is reporting an absent model key rather than a fault.
fn is_missing_key(err: &RedisError) -> bool {
    if err.kind() != ErrorKind::ResponseError {
        return false;
    }
    match err.detail() {
        Some(detail) => {
            let detail = detail.to_ascii_lowercase();
            detail.contains("no such key") || detail.contains("key is empty")
        }
        None => false,
    }
}

fn meta_from_reply(reply: redis::Value) -> Result<ModelMeta, StoreError> {
    let fields: Vec<redis::Value> = redis::from_redis_value(&reply).map_err(StoreError::new)?;
    let mut meta = ModelMeta {
        backend: String::new(),
        device: String::new(),
        tag: None,
        batchsize: 0,
        minbatchsize: 0,
        inputs: Vec::new(),
        outputs: Vec::new(),
    };
    for pair in fields.chunks(2) {
        let [name, value] = pair else { continue };
        let name: String = redis::from_redis_value(name).map_err(StoreError::new)?;
        match name.as_str() {
            "backend" => meta.backend = redis::from_redis_value(value).map_err(StoreError::new)?,
            "device" => meta.device = redis::from_redis_value(value).map_err(StoreError::new)?,
            "tag" => {
                let tag: String = redis::from_redis_value(value).map_err(StoreError::new)?;
                meta.tag = (!tag.is_empty()).then_some(tag);
            }
            "batchsize" => {
                meta.batchsize = redis::from_redis_value(value).map_err(StoreError::new)?
            }
            "minbatchsize" => {
                meta.minbatchsize = redis::from_redis_value(value).map_err(StoreError::new)?
            }
            "inputs" => meta.inputs = redis::from_redis_value(value).map_err(StoreError::new)?,
            "outputs" => meta.outputs = redis::from_redis_value(value).map_err(StoreError::new)?,
            _ => {}
        }
    }
    Ok(meta)
}

impl ModelStore for RedisModelStore {
    fn set_model(&mut self, key: &str, request: &PublishRequest<'_>) -> Result<(), StoreError> {
        let mut cmd = redis::cmd("AI.MODELSET");
        cmd.arg(key).arg(request.backend).arg(request.device.as_str());
        if let Some(inputs) = request.inputs {
            cmd.arg("INPUTS");
            for name in inputs {
                cmd.arg(name);
            }
        }
        if let Some(outputs) = request.outputs {
            cmd.arg("OUTPUTS");
            for name in outputs {
                cmd.arg(name);
            }
        }
        cmd.arg("BLOB").arg(request.blob);
        cmd.query::<()>(&mut self.conn).map_err(StoreError::new)
    }

    fn delete_model(&mut self, key: &str) -> Result<bool, StoreError> {
        match redis::cmd("AI.MODELDEL")
            .arg(key)
            .query::<()>(&mut self.conn)
        {
            Ok(()) => Ok(true),
            Err(err) if is_missing_key(&err) => Ok(false),
            Err(err) => Err(StoreError::new(err)),
        }
    }

    fn model_meta(&mut self, key: &str) -> Result<Option<ModelMeta>, StoreError> {
        match redis::cmd("AI.MODELGET")
            .arg(key)
            .arg("META")
            .query::<redis::Value>(&mut self.conn)
        {
            Ok(redis::Value::Nil) => Ok(None),
            Ok(reply) => meta_from_reply(reply).map(Some),
            Err(err) if is_missing_key(&err) => Ok(None),
            Err(err) => Err(StoreError::new(err)),
        }
    }

    fn list_models(&mut self) -> Result<Vec<String>, StoreError> {
        // AI._MODELSCAN replies with the complete (key, tag) set in one
        // array, so the exhaust-all-pages contract holds trivially here.
        let rows: Vec<(String, Option<String>)> = redis::cmd("AI._MODELSCAN")
            .query(&mut self.conn)
            .map_err(StoreError::new)?;
        Ok(rows.into_iter().map(|(key, _)| key).collect())
    }
}
