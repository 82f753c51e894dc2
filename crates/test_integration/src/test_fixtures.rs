use serde_json::{Value, json};

/// The seeded collection. Shapes vary on purpose: joined strings, `$oid` ids, a missing rating and
/// a missing `adult` flag all appear the way they do in real exports.
pub fn fixture_documents() -> Vec<Value> {
    vec![
        json!({
            "_id": "a",
            "title": "A Movie",
            "release_date": "2000-01-01",
            "original_language": "en",
            "average_rating": 7.0,
            "adult": false,
            "production_countries": ["United States of America"],
            "genres": ["Drama"],
            "runtime": 120,
            "cast": ["Jane Doe", "John Roe"],
        }),
        json!({
            "_id": "b",
            "title": "B Movie",
            "release_date": "1990-01-01",
            "original_language": "fr",
            "average_rating": 6.0,
            "adult": false,
            "production_countries": "France",
            "genres": "Comedy",
            "runtime": 95,
        }),
        json!({
            "_id": "c",
            "title": "C Movie",
            "release_date": "2002-06-01T00:00:00Z",
            "original_language": "en",
            "average_rating": 8.0,
            "adult": true,
            "production_countries": ["Russia"],
            "genres": "Crime, Drama",
            "runtime": 135,
        }),
        json!({
            "_id": {"$oid": "d"},
            "title": "D Movie",
            "release_date": "2015-03-10",
            "original_language": "ja",
            "production_countries": "Japan",
            "genres": ["Animation", "Family"],
            "runtime": 100,
        }),
    ]
}
