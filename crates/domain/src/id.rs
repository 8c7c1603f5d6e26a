use uuid::Uuid;

/// Generate a fresh opaque identifier.
#[must_use]
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

macro_rules! id_type {
    ($name: ident) => {
        #[derive(
            derive_more::Deref,
            derive_more::Display,
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
        )]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn generate() -> Self {
                Self(generate_id())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_type!(TemplateID);
id_type!(BlockID);
id_type!(ExerciseID);
id_type!(SetID);
