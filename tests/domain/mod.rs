mod clustering_test;
mod embedding_test;
mod segment_test;
