//! Resolution of two values defined for the same configuration.

use crate::table::{AttributeTypeMask, Value};

/// Outcome of a value collision.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CollisionResult {
    /// Keep the value already in the table
    KeepOriginal,
    /// Replace it with the incoming value
    TakeNew,
    /// The two values cannot coexist
    Conflict,
}

/// Decides what happens when `incoming` is added where `existing` already lives.
///
/// Weak values always give way to strong ones. Two strong values collide unless both are
/// attributes: declarations with the same format keep the existing one, and a weak
/// attribute use accepting any format gives way to any other attribute.
///
/// # Examples
///
/// ```rust
/// use resforge::table::{resolve_value_collision, BinaryPrimitive, CollisionResult, Value, ValueKind};
///
/// let strong = Value::new(ValueKind::Primitive(BinaryPrimitive::boolean(true)));
/// assert_eq!(resolve_value_collision(&strong, &Value::id()), CollisionResult::KeepOriginal);
/// assert_eq!(resolve_value_collision(&strong, &strong), CollisionResult::Conflict);
/// ```
#[must_use]
pub fn resolve_value_collision(existing: &Value, incoming: &Value) -> CollisionResult {
    let existing_attr = existing.as_attribute();
    let incoming_attr = incoming.as_attribute();

    let (Some(existing_attr), Some(incoming_attr)) = (existing_attr, incoming_attr) else {
        if incoming.is_weak() {
            return CollisionResult::KeepOriginal;
        }
        if existing.is_weak() {
            return CollisionResult::TakeNew;
        }
        return CollisionResult::Conflict;
    };

    if existing_attr.type_mask == incoming_attr.type_mask {
        return if existing.is_weak() {
            CollisionResult::TakeNew
        } else {
            CollisionResult::KeepOriginal
        };
    }

    if existing.is_weak() && existing_attr.type_mask == AttributeTypeMask::TYPE_ANY {
        return CollisionResult::TakeNew;
    }

    if incoming.is_weak() && incoming_attr.type_mask == AttributeTypeMask::TYPE_ANY {
        return CollisionResult::KeepOriginal;
    }

    CollisionResult::Conflict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Attribute, BinaryPrimitive, ValueKind};

    fn primitive(data: i32, weak: bool) -> Value {
        Value::new(ValueKind::Primitive(BinaryPrimitive::int(data))).with_weak(weak)
    }

    fn attr(mask: AttributeTypeMask, weak: bool) -> Value {
        Value::new(ValueKind::Attribute(Attribute::new(mask))).with_weak(weak)
    }

    #[test]
    fn weak_values_give_way() {
        assert_eq!(
            resolve_value_collision(&primitive(1, false), &primitive(2, true)),
            CollisionResult::KeepOriginal
        );
        assert_eq!(
            resolve_value_collision(&primitive(1, true), &primitive(2, false)),
            CollisionResult::TakeNew
        );
        assert_eq!(
            resolve_value_collision(&Value::id(), &Value::id()),
            CollisionResult::KeepOriginal
        );
    }

    #[test]
    fn strong_values_conflict() {
        assert_eq!(
            resolve_value_collision(&primitive(1, false), &primitive(1, false)),
            CollisionResult::Conflict
        );
        assert_eq!(
            resolve_value_collision(&primitive(1, false), &attr(AttributeTypeMask::STRING, false)),
            CollisionResult::Conflict
        );
    }

    #[test]
    fn attribute_rules() {
        let string = AttributeTypeMask::STRING;
        let color = AttributeTypeMask::COLOR;
        let any = AttributeTypeMask::TYPE_ANY;

        assert_eq!(
            resolve_value_collision(&attr(string, false), &attr(string, false)),
            CollisionResult::KeepOriginal
        );
        assert_eq!(
            resolve_value_collision(&attr(string, true), &attr(string, false)),
            CollisionResult::TakeNew
        );
        assert_eq!(
            resolve_value_collision(&attr(any, true), &attr(color, false)),
            CollisionResult::TakeNew
        );
        assert_eq!(
            resolve_value_collision(&attr(color, false), &attr(any, true)),
            CollisionResult::KeepOriginal
        );
        assert_eq!(
            resolve_value_collision(&attr(color, false), &attr(string, false)),
            CollisionResult::Conflict
        );
        assert_eq!(
            resolve_value_collision(&attr(color, false), &attr(any, false)),
            CollisionResult::Conflict
        );
    }
}
