diesel::table! {
    listings (id) {
        id -> Integer,
        title -> Text,
        description -> Text,
        category -> Text,
        name -> Text,
        contact -> Text,
        location -> Text,
        condition -> Nullable<Text>,
        price -> Nullable<Text>,
        mode -> Nullable<Text>,
        image -> Text,
        created_at -> Timestamp,
    }
}
