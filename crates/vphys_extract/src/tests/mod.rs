//! Pipeline tests over complete KV3 documents
