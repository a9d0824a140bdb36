// ABOUTME: Strongly typed integer identifiers for users, ingredients, and recipes
// ABOUTME: Prevents mixing up the three id spaces that share the same SQL representation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database id
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw value as stored in the database
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user
    UserId
);

define_id!(
    /// Identifier of a catalog ingredient
    IngredientId
);

define_id!(
    /// Identifier of a catalog recipe
    RecipeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&RecipeId::new(7)).unwrap();
        assert_eq!(json, "7");

        let parsed: UserId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed.get(), 12);
    }

    #[test]
    fn test_ids_order_numerically() {
        let mut ids = vec![IngredientId::new(10), IngredientId::new(2), IngredientId::new(7)];
        ids.sort();
        assert_eq!(ids, vec![IngredientId::new(2), IngredientId::new(7), IngredientId::new(10)]);
    }
}
