pub mod schema {
    diesel::table! {
      chainsift_headers (id) {
          id -> Int8,
          block_number -> Int8,
          block_hash -> VarChar,
          source_id -> VarChar,
          inserted_at -> Timestamptz,
      }
    }
}
