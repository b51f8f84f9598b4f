use anyhow::Result;
use futures::stream::StreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, to_bson, Document},
    Collection, Cursor,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
    fn get_id_filter(&self) -> Document;
}

fn get_id_filter(oid: &ObjectId) -> Document {
    doc! {
        "_id": oid
    }
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Document {
    let raw = D::from_domain(entity);
    doc_to_persistence(&raw)
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Option<E> {
    match bson::from_document::<D>(doc) {
        Ok(raw) => Some(raw.to_domain()),
        Err(err) => {
            error!("Unable to deserialize document: {:?}", err);
            None
        }
    }
}

fn doc_to_persistence<E, D: MongoDocument<E>>(raw: &D) -> Document {
    to_bson(raw)
        .ok()
        .and_then(|b| b.as_document().cloned())
        .unwrap_or_default()
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity);
    collection.insert_one(doc, None).await?;
    Ok(())
}

pub async fn find<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Option<E> {
    let filter = get_id_filter(id);
    find_one_by::<E, D>(collection, filter).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Option<E> {
    match collection.find_one(filter, None).await {
        Ok(Some(doc)) => persistence_to_entity::<E, D>(doc),
        _ => None,
    }
}

pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<Vec<E>> {
    let cursor = collection.find(filter, None).await?;
    Ok(consume_cursor::<E, D>(cursor).await)
}

pub async fn delete<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Option<E> {
    let filter = get_id_filter(id);
    match collection.find_one_and_delete(filter, None).await {
        Ok(Some(doc)) => persistence_to_entity::<E, D>(doc),
        _ => None,
    }
}

async fn consume_cursor<E, D: MongoDocument<E>>(mut cursor: Cursor<Document>) -> Vec<E> {
    let mut documents = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(document) => {
                if let Some(entity) = persistence_to_entity::<E, D>(document) {
                    documents.push(entity);
                }
            }
            Err(err) => {
                error!("Error getting cursor document: {:?}", err);
            }
        }
    }
    documents
}
