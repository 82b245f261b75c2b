//! End-to-end batching tests
//!
//! These tests drive the request-scoped loader layer through a real
//! async-graphql schema, with in-memory data sources that count every bulk
//! fetch. They prove the consumer contract the resolvers rely on: a wide
//! fan-out costs a constant number of backend calls, sibling fields share
//! fetches, and a missing record is a null field rather than an error.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Request, Schema};
use serde_json::json;
use uuid::Uuid;

use pulse_api::graphql::dataloader::{DataLoader, Loader};

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct TestUser {
    id: Uuid,
    name: String,
}

#[derive(Clone)]
struct TestProfile {
    user_id: Uuid,
    member_type_id: &'static str,
}

#[derive(Clone)]
struct TestMemberType {
    id: &'static str,
    discount: f64,
}

/// Shared fixture data plus fetch counters, one per relation kind
#[derive(Clone, Default)]
struct World {
    users: HashMap<Uuid, TestUser>,
    profiles: HashMap<Uuid, TestProfile>,
    member_types: HashMap<&'static str, TestMemberType>,
    user_fetches: Arc<AtomicUsize>,
    profile_fetches: Arc<AtomicUsize>,
    member_type_fetches: Arc<AtomicUsize>,
}

impl World {
    /// Fifty users, every second one with a profile, two member types
    fn populated() -> Self {
        let mut world = World::default();
        for tier in [
            TestMemberType {
                id: "BASIC",
                discount: 0.0,
            },
            TestMemberType {
                id: "BUSINESS",
                discount: 7.7,
            },
        ] {
            world.member_types.insert(tier.id, tier);
        }
        for i in 0..50 {
            let id = Uuid::new_v4();
            world.users.insert(
                id,
                TestUser {
                    id,
                    name: format!("user-{i}"),
                },
            );
            if i % 2 == 0 {
                world.profiles.insert(
                    id,
                    TestProfile {
                        user_id: id,
                        member_type_id: if i % 4 == 0 { "BASIC" } else { "BUSINESS" },
                    },
                );
            }
        }
        world
    }
}

struct UserSource(World);

impl Loader for UserSource {
    type Key = Uuid;
    type Value = TestUser;
    type Error = String;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, TestUser>, String> {
        self.0.user_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(keys
            .iter()
            .filter_map(|k| self.0.users.get(k).cloned().map(|u| (*k, u)))
            .collect())
    }
}

struct ProfileByUserSource(World);

impl Loader for ProfileByUserSource {
    type Key = Uuid;
    type Value = TestProfile;
    type Error = String;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, TestProfile>, String> {
        self.0.profile_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(keys
            .iter()
            .filter_map(|k| self.0.profiles.get(k).cloned().map(|p| (*k, p)))
            .collect())
    }
}

struct MemberTypeSource(World);

impl Loader for MemberTypeSource {
    type Key = &'static str;
    type Value = TestMemberType;
    type Error = String;

    async fn load(
        &self,
        keys: &[&'static str],
    ) -> Result<HashMap<&'static str, TestMemberType>, String> {
        self.0.member_type_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(keys
            .iter()
            .filter_map(|k| self.0.member_types.get(k).cloned().map(|m| (*k, m)))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// GraphQL surface over the fixture
// ---------------------------------------------------------------------------

struct GqlUser(TestUser);

#[Object]
impl GqlUser {
    async fn id(&self) -> Uuid {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn profile(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<GqlProfile>> {
        let loader = ctx.data::<DataLoader<ProfileByUserSource>>()?;
        Ok(loader.load_one(self.0.id).await?.map(GqlProfile))
    }
}

struct GqlProfile(TestProfile);

#[Object]
impl GqlProfile {
    async fn user_id(&self) -> Uuid {
        self.0.user_id
    }

    async fn member_type(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<GqlMemberType>> {
        let loader = ctx.data::<DataLoader<MemberTypeSource>>()?;
        Ok(loader.load_one(self.0.member_type_id).await?.map(GqlMemberType))
    }
}

struct GqlMemberType(TestMemberType);

#[Object]
impl GqlMemberType {
    async fn id(&self) -> &str {
        self.0.id
    }

    async fn discount(&self) -> f64 {
        self.0.discount
    }
}

struct QueryRoot {
    world: World,
}

#[Object]
impl QueryRoot {
    /// Listing query: fetches everything in one pass and primes the loader,
    /// like the production `users` resolver
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<GqlUser>> {
        let loader = ctx.data::<DataLoader<UserSource>>()?;
        let mut users: Vec<_> = self.world.users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        for user in &users {
            loader.prime(user.id, user.clone());
        }
        Ok(users.into_iter().map(GqlUser).collect())
    }

    async fn user(&self, ctx: &Context<'_>, id: Uuid) -> async_graphql::Result<Option<GqlUser>> {
        let loader = ctx.data::<DataLoader<UserSource>>()?;
        Ok(loader.load_one(id).await?.map(GqlUser))
    }
}

type TestSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

fn schema_for(world: &World) -> TestSchema {
    Schema::build(
        QueryRoot {
            world: world.clone(),
        },
        EmptyMutation,
        EmptySubscription,
    )
    .finish()
}

/// Mirror of the production HTTP handler: one fresh loader set per request
fn request_with_loaders(query: &str, world: &World) -> Request {
    Request::new(query)
        .data(DataLoader::new(UserSource(world.clone())))
        .data(DataLoader::new(ProfileByUserSource(world.clone())))
        .data(DataLoader::new(MemberTypeSource(world.clone())))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fifty_user_fan_out_costs_constant_fetches() {
    let world = World::populated();
    let schema = schema_for(&world);

    let response = schema
        .execute(request_with_loaders(
            "{ users { id profile { memberType { id discount } } } }",
            &world,
        ))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    // One batched fetch per relation regardless of the 50-way fan-out.
    assert_eq!(world.profile_fetches.load(Ordering::SeqCst), 1);
    assert_eq!(world.member_type_fetches.load(Ordering::SeqCst), 1);
    // The listing primed the user loader; no per-user fetch happened at all.
    assert_eq!(world.user_fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sibling_fields_share_one_user_fetch() {
    let world = World::populated();
    let schema = schema_for(&world);
    let id = *world.users.keys().next().unwrap();

    let query = format!(
        r#"{{ a: user(id: "{id}") {{ name }} b: user(id: "{id}") {{ name }} }}"#
    );
    let response = schema
        .execute(request_with_loaders(&query, &world))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["a"]["name"], data["b"]["name"]);
    assert_eq!(world.user_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_user_is_null_not_error() {
    let world = World::populated();
    let schema = schema_for(&world);

    let query = format!(r#"{{ user(id: "{}") {{ name }} }}"#, Uuid::new_v4());
    let response = schema
        .execute(request_with_loaders(&query, &world))
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(response.data.into_json().unwrap(), json!({ "user": null }));
    assert_eq!(world.user_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_loaders_do_not_leak_between_requests() {
    let world = World::populated();
    let schema = schema_for(&world);
    let id = *world.users.keys().next().unwrap();
    let query = format!(r#"{{ user(id: "{id}") {{ name }} }}"#);

    for _ in 0..2 {
        let response = schema
            .execute(request_with_loaders(&query, &world))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
    }

    // Each request got a fresh loader, so the second one fetched again.
    assert_eq!(world.user_fetches.load(Ordering::SeqCst), 2);
}
