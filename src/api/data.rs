//! Static lookup tables served by the profile endpoints.
//!
//! Every table is an immutable `static` slice of `(key, record)` pairs that
//! lives for the whole process. Nothing here is ever written to.

use serde::Serialize;

/// Full hero profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub role: &'static str,
    pub team: &'static str,
}

/// Post author, as shown on the nested post route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: &'static str,
    pub role: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Post {
    pub title: &'static str,
    pub content: &'static str,
}

/// First version of the versioned profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileV1 {
    pub version: &'static str,
    pub name: &'static str,
    pub role: &'static str,
}

/// Second version: adds company and team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileV2 {
    pub version: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub team: &'static str,
}

pub const STEVE_ROGERS: Profile = Profile {
    name: "Steve Rogers",
    role: "Captain America",
    team: "Avengers",
};

pub const TONY_STARK: Profile = Profile {
    name: "Tony Stark",
    role: "Iron Man",
    team: "Avengers",
};

/// Profile returned by `/api/profile/me`.
pub const MY_PROFILE: Profile = STEVE_ROGERS;

/// Profiles by user id.
pub static PROFILES: &[(&str, Profile)] = &[("1", STEVE_ROGERS), ("2", TONY_STARK)];

/// Post authors by user id.
pub static AUTHORS: &[(&str, Author)] = &[
    (
        "12",
        Author {
            name: "Steve Rogers",
            role: "Captain America",
        },
    ),
    (
        "34",
        Author {
            name: "Tony Stark",
            role: "Iron Man",
        },
    ),
];

/// Posts by post id.
pub static POSTS: &[(&str, Post)] = &[
    (
        "101",
        Post {
            title: "Why Shield Still Matters",
            content: "Even in modern warfare, old-fashioned courage counts.",
        },
    ),
    (
        "202",
        Post {
            title: "Suit Upgrade Ideas",
            content: "Thinking about integrating vibranium into the Mark L armor.",
        },
    ),
];

/// Stand-in author for user ids missing from [`AUTHORS`].
pub const UNKNOWN_AUTHOR: Author = Author {
    name: "Unknown",
    role: "Unknown",
};

/// Stand-in post for post ids missing from [`POSTS`].
pub const MISSING_POST: Post = Post {
    title: "Not found",
    content: "No content available.",
};

pub const PROFILE_V1: ProfileV1 = ProfileV1 {
    version: "v1",
    name: "Tony Stark",
    role: "Iron Man",
};

pub const PROFILE_V2: ProfileV2 = ProfileV2 {
    version: "v2",
    name: "Tony Stark",
    role: "Iron Man",
    company: "Stark Industries",
    team: "Avengers",
};

/// Find `key` in a static table.
pub fn lookup<T>(table: &'static [(&'static str, T)], key: &str) -> Option<&'static T> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, record)| record)
}
