// Cabeceras fijas de los dos almacenes tabulares (CSV).
// El orden de las columnas es el de los campos en `models.rs`.

pub const NODE_HEADER: [&str; 6] = ["id", "label", "followers", "genres", "popularity", "image_url"];

pub const EDGE_HEADER: [&str; 2] = ["source", "target"];
