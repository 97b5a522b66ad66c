// Database schema for the fantasy league
diesel::table! {
    players (id) {
        id -> Text,                // 24-char hex entity id
        first_name -> Text,
        last_name -> Text,
        role -> Text,              // GOALKEEPER, DEFENDER, MIDFIELDER, ATTACKER
        country -> Text,           // stored lowercase
        age -> Integer,
        market_value -> BigInt,
        deleted -> Bool,           // soft-delete tombstone
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    teams (id) {
        id -> Text,
        name -> Text,
        country -> Text,
        user_id -> Nullable<Text>,
        total_cost -> BigInt,      // derived roster cost cache
        balance_amount -> BigInt,
        deleted -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    team_players (id) {
        id -> Integer,
        team_id -> Text,
        player_id -> Text,
        position -> Integer,       // roster ordering
    }
}

diesel::table! {
    transfer_listings (id) {
        id -> Text,
        player_id -> Text,
        team_id -> Nullable<Text>, // team snapshot at listing time
        asking_price -> BigInt,
        deleted -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    users (id) {
        id -> Text,
        first_name -> Text,
        last_name -> Text,
        email -> Text,             // stored lowercase, unique among live rows
        role -> Text,              // USER, ADMIN
        password_digest -> Text,
        deleted -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    sessions (id) {
        id -> Text,
        user_id -> Text,
        access_token -> Text,
        refresh_token -> Text,
        access_valid_till -> Timestamp,
        refresh_valid_till -> Timestamp,
    }
}

diesel::joinable!(team_players -> teams (team_id));
diesel::joinable!(team_players -> players (player_id));

diesel::allow_tables_to_appear_in_same_query!(
    players,
    teams,
    team_players,
    transfer_listings,
    users,
    sessions,
);
