use querysculptor_schema::CachedSchema;
use querysculptor_tools::AppConfig;
use querysculptor_tools::AppContext;

pub const ENDPOINT: &str = "https://example.test/graphql";

pub const SDL: &str = "
type Query {
  pokemon(id: ID!): Pokemon
  pokemons(first: Int, after: String): [Pokemon!]!
}

type Mutation {
  createTrainer(input: TrainerInput!): Trainer!
}

type Pokemon {
  id: ID!
  name: String!
  level: Int!
  pokemonType: PokemonType!
  trainer: Trainer
}

type Trainer {
  id: ID!
  name: String!
  pokemons: [Pokemon!]!
}

enum PokemonType {
  FIRE
  WATER
  GRASS
}

input TrainerInput {
  name: String!
  age: Int
}
";

/// Builds an `AppContext` with its schema cache already primed for
/// `ENDPOINT`, so handler tests never attempt a live introspection call.
pub async fn test_context() -> AppContext {
    let ctx = AppContext::new(AppConfig {
        graphql_endpoint: ENDPOINT.to_string(),
        env_headers: Default::default(),
        redis_url: "redis://127.0.0.1:1".to_string(),
    });
    let schema = CachedSchema::from_sdl(ENDPOINT, SDL.to_string(), serde_json::json!({})).unwrap();
    ctx.schema_cache.prime(ENDPOINT, schema).await;
    ctx
}
