//! esfeed-elastic — Elasticsearch index store for esfeed.
//!
//! [`ElasticStore`] implements [`esfeed_core::IndexStore`] with three REST
//! calls:
//!
//! | Operation      | Request                                   |
//! |----------------|-------------------------------------------|
//! | `create_index` | `PUT /{index}` with `{"settings": ...}`   |
//! | `put_mapping`  | `PUT /{index}/_mapping[/{type}]`          |
//! | `bulk_index`   | `POST /_bulk` with an NDJSON body         |

pub mod client;
pub mod payload;

pub use client::ElasticStore;
