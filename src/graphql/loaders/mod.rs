//! Per-kind loaders and the request-scoped loader registry
//!
//! Each loader binds the generic batch collector in
//! [`crate::graphql::dataloader`] to one relation's bulk query and one
//! key→value reconstruction rule:
//!
//! - Direct loaders return `Option<T>` for a single entity by key
//!   ([`UserLoader`], [`MemberTypeLoader`], [`ProfileByUserLoader`])
//! - Grouped loaders return `Vec<T>` of children sharing a foreign key
//!   ([`PostsByAuthorLoader`], [`ProfilesByMemberTypeLoader`])
//! - Junction loaders return related ids reached through the subscription
//!   table, one loader type per direction ([`FollowingLoader`],
//!   [`FollowersLoader`])
//!
//! [`register`] is the registry: the HTTP handler calls it once per inbound
//! GraphQL request so that every resolver of that request shares one fresh
//! loader per kind, and nothing leaks into the next request.

mod followers;
mod following;
mod member_type;
mod posts_by_author;
mod profile_by_user;
mod profiles_by_member_type;
mod user;

pub use followers::FollowersLoader;
pub use following::FollowingLoader;
pub use member_type::MemberTypeLoader;
pub use posts_by_author::PostsByAuthorLoader;
pub use profile_by_user::ProfileByUserLoader;
pub use profiles_by_member_type::ProfilesByMemberTypeLoader;
pub use user::UserLoader;

use std::collections::HashMap;
use std::hash::Hash;

use async_graphql::Request;
use sqlx::PgPool;

use super::dataloader::DataLoader;

/// Attach one fresh loader of every kind to a GraphQL request's context.
///
/// All loaders are bound to the same pool the rest of the request resolves
/// against. Resolvers reach them through `ctx.data::<DataLoader<...>>()`.
pub fn register(request: Request, pool: &PgPool) -> Request {
    request
        .data(DataLoader::new(UserLoader::new(pool.clone())))
        .data(DataLoader::new(MemberTypeLoader::new(pool.clone())))
        .data(DataLoader::new(ProfileByUserLoader::new(pool.clone())))
        .data(DataLoader::new(PostsByAuthorLoader::new(pool.clone())))
        .data(DataLoader::new(ProfilesByMemberTypeLoader::new(pool.clone())))
        .data(DataLoader::new(FollowingLoader::new(pool.clone())))
        .data(DataLoader::new(FollowersLoader::new(pool.clone())))
}

/// Partition rows by a derived key, guaranteeing an entry for every
/// requested key (empty when no rows match).
fn group_by<K, R>(keys: &[K], rows: Vec<R>, key_of: impl Fn(&R) -> K) -> HashMap<K, Vec<R>>
where
    K: Hash + Eq + Clone,
{
    let mut grouped: HashMap<K, Vec<R>> = HashMap::with_capacity(keys.len());
    for row in rows {
        grouped.entry(key_of(&row)).or_default().push(row);
    }
    for key in keys {
        grouped.entry(key.clone()).or_default();
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subscription;
    use uuid::Uuid;

    fn link(subscriber_id: Uuid, author_id: Uuid) -> Subscription {
        Subscription {
            subscriber_id,
            author_id,
        }
    }

    #[test]
    fn test_group_by_fills_empty_groups_for_all_keys() {
        let keys = [1, 2, 3];
        let grouped = group_by(&keys, vec![(1, "a"), (1, "b"), (3, "c")], |row| row.0);

        assert_eq!(grouped[&1], vec![(1, "a"), (1, "b")]);
        assert!(grouped[&2].is_empty());
        assert_eq!(grouped[&3], vec![(3, "c")]);
    }

    #[test]
    fn test_junction_directions_project_opposite_sides() {
        let (alice, bob, carol) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        // alice follows bob and carol; bob follows alice
        let links = vec![link(alice, bob), link(alice, carol), link(bob, alice)];
        let keys = [alice, bob, carol];

        let follows = following::group_links(&keys, links.clone());
        let followed_by = followers::group_links(&keys, links);

        let mut alice_follows = follows[&alice].clone();
        alice_follows.sort();
        let mut expected = vec![bob, carol];
        expected.sort();
        assert_eq!(alice_follows, expected);

        // carol follows nobody but is followed by alice: the two directions
        // must not be conflated.
        assert!(follows[&carol].is_empty());
        assert_eq!(followed_by[&carol], vec![alice]);

        // alice and bob follow each other: only there do the directions agree.
        assert_eq!(follows[&bob], vec![alice]);
        assert_eq!(followed_by[&bob], vec![alice]);
    }
}
