//! Target type descriptors

use std::any::Any;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A structural description of a conversion target type
///
/// A descriptor is a base identifier plus an ordered list of argument
/// descriptors, so `Vec<i64>` and `Vec<String>` are different descriptors.
/// Equality and hashing are structural.
///
/// # Example
///
/// ```
/// use coordconf_core::TypeDescriptor;
///
/// let ints = TypeDescriptor::of::<Vec<i64>>();
/// assert_eq!(ints, TypeDescriptor::generic("Vec", vec![TypeDescriptor::simple("i64")]));
/// assert_ne!(ints, TypeDescriptor::of::<Vec<String>>());
/// assert_eq!(ints.to_string(), "Vec<i64>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeDescriptor {
    base: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// A non-parameterized type
    pub fn simple(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            arguments: Vec::new(),
        }
    }

    /// A parameterized type
    pub fn generic(base: impl Into<String>, arguments: Vec<TypeDescriptor>) -> Self {
        Self {
            base: base.into(),
            arguments,
        }
    }

    /// The descriptor of a Rust type
    pub fn of<T: ConfigType>() -> Self {
        T::descriptor()
    }

    /// The descriptor lookups use when no type is given
    pub fn string() -> Self {
        Self::of::<String>()
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn arguments(&self) -> &[TypeDescriptor] {
        &self.arguments
    }

    pub fn is_parameterized(&self) -> bool {
        !self.arguments.is_empty()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if self.arguments.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", argument)?;
        }
        f.write_str(">")
    }
}

/// A Rust type that configuration values can be converted to
///
/// Implement this for your own types and register a conversion for them
/// with a [`StandardConverter`](crate::convert::StandardConverter).
pub trait ConfigType: Any + Send + Sync {
    /// The descriptor identifying this type
    fn descriptor() -> TypeDescriptor;
}

macro_rules! simple_config_types {
    ($($ty:ty => $name:expr),* $(,)?) => {
        $(
            impl ConfigType for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::simple($name)
                }
            }
        )*
    };
}

simple_config_types! {
    String => "String",
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    PathBuf => "PathBuf",
}

impl<T: ConfigType> ConfigType for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::generic("Vec", vec![T::descriptor()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_structural_equality() {
        let a = TypeDescriptor::of::<Vec<Vec<u16>>>();
        let b = TypeDescriptor::generic(
            "Vec",
            vec![TypeDescriptor::generic("Vec", vec![TypeDescriptor::simple("u16")])],
        );
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&TypeDescriptor::of::<Vec<u16>>()));
    }

    #[test]
    fn test_simple_vs_parameterized() {
        let string = TypeDescriptor::string();
        assert_eq!(string.base(), "String");
        assert!(!string.is_parameterized());

        let list = TypeDescriptor::of::<Vec<String>>();
        assert!(list.is_parameterized());
        assert_eq!(list.arguments(), &[TypeDescriptor::string()]);
    }

    #[test]
    fn test_display() {
        let map = TypeDescriptor::generic(
            "Map",
            vec![TypeDescriptor::string(), TypeDescriptor::of::<Vec<f64>>()],
        );
        assert_eq!(map.to_string(), "Map<String, Vec<f64>>");
        assert_eq!(TypeDescriptor::of::<PathBuf>().to_string(), "PathBuf");
    }

    #[test]
    fn test_serialized_form_omits_empty_arguments() {
        let yaml = serde_yaml::to_string(&TypeDescriptor::simple("bool")).unwrap();
        assert!(!yaml.contains("arguments"));

        let parsed: TypeDescriptor =
            serde_yaml::from_str("base: Vec\narguments:\n  - base: i32\n").unwrap();
        assert_eq!(parsed, TypeDescriptor::of::<Vec<i32>>());
    }
}
