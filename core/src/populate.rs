//! Populate pass: re-decode the input bytes into a resolved skeleton.
//!
//! The skeleton drives `serde_json` as a [`DeserializeSeed`]. At a typed node
//! the target type's own `Deserialize` impl reads the live map through
//! [`ChildFilter`], which diverts declared child keys into side slots and
//! passes every other key straight through. The decoded children are then
//! assigned through the type's setter table.
//!
//! Typed nodes below the root are captured as borrowed [`RawValue`]s and
//! decoded from their own text, so the erased factory only ever sees a
//! concrete `serde_json` deserializer.

use crate::{Decoded, DecodeError, Instance, Polymorphic, Skeleton, TypedSkeleton, TypedValue};
use serde::de::value::MapAccessDeserializer;
use serde::de::{
    self, DeserializeSeed, Deserializer, IgnoredAny, IntoDeserializer, MapAccess, SeqAccess,
    Visitor,
};
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Decode `bytes` into the shape described by `skeleton`.
///
/// `bytes` must be the same document the skeleton was resolved from.
pub(crate) fn populate(bytes: &[u8], skeleton: &Skeleton<'_>) -> Result<Decoded, DecodeError> {
    if let Skeleton::Typed(typed) = skeleton {
        return decode_typed(bytes, typed).map_err(DecodeError::Populate);
    }

    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let decoded = SkeletonSeed(skeleton)
        .deserialize(&mut deserializer)
        .map_err(DecodeError::Populate)?;
    deserializer.end().map_err(DecodeError::Populate)?;
    Ok(decoded)
}

fn decode_typed(bytes: &[u8], skeleton: &TypedSkeleton<'_>) -> Result<Decoded, serde_json::Error> {
    let prototype = skeleton.binding().prototype();
    let instance = prototype.instantiate(bytes, skeleton)?;
    Ok(Decoded::Typed(TypedValue::new(prototype.shared_name(), instance)))
}

/// Factory body behind every [`Prototype`](crate::Prototype): deserialize a `T`
/// from one object's bytes, then assign its children.
pub(crate) fn instantiate<T: Polymorphic>(
    bytes: &[u8],
    skeleton: &TypedSkeleton<'_>,
) -> Result<Box<dyn Instance>, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = deserializer.deserialize_map(InstanceVisitor::<T> {
        skeleton,
        marker: PhantomData,
    })?;
    deserializer.end()?;
    Ok(Box::new(value))
}

struct SkeletonSeed<'s, 't>(&'s Skeleton<'t>);

impl<'de> DeserializeSeed<'de> for SkeletonSeed<'_, '_> {
    type Value = Decoded;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Decoded, D::Error> {
        match self.0 {
            Skeleton::Untyped => Value::deserialize(deserializer).map(Decoded::Untyped),
            Skeleton::Typed(typed) => {
                let raw = <&RawValue>::deserialize(deserializer)?;
                decode_typed(raw.get().as_bytes(), typed).map_err(<D::Error as de::Error>::custom)
            }
            Skeleton::Sequence(items) => deserializer.deserialize_seq(SequenceVisitor(items)),
        }
    }
}

struct InstanceVisitor<'s, 't, T> {
    skeleton: &'s TypedSkeleton<'t>,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T: Polymorphic> Visitor<'de> for InstanceVisitor<'_, '_, T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.skeleton.binding().prototype().name();
        write!(f, "an object decodable as {name}")
    }

    fn visit_map<M: MapAccess<'de>>(self, map: M) -> Result<T, M::Error> {
        let declared = self.skeleton.binding().children();
        let mut slots: Vec<Option<Decoded>> = declared.iter().map(|_| None).collect();

        let filter = ChildFilter {
            map,
            skeleton: self.skeleton,
            slots: &mut slots,
        };
        let mut value = <T as Deserialize<'de>>::deserialize(MapAccessDeserializer::new(filter))?;

        for (child, slot) in declared.iter().zip(slots) {
            let decoded = slot.ok_or_else(|| {
                <M::Error as de::Error>::custom(format!(
                    "missing required child field \"{}\"",
                    child.field()
                ))
            })?;
            value
                .set_child(child.field(), decoded)
                .map_err(<M::Error as de::Error>::custom)?;
        }
        Ok(value)
    }
}

/// Map view handed to the target type: declared child keys never reach it.
struct ChildFilter<'a, 's, 't, M> {
    map: M,
    skeleton: &'s TypedSkeleton<'t>,
    slots: &'a mut [Option<Decoded>],
}

impl<'de, M: MapAccess<'de>> MapAccess<'de> for ChildFilter<'_, '_, '_, M> {
    type Error = M::Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, M::Error> {
        let declared = self.skeleton.binding().children();
        while let Some(key) = self.map.next_key::<String>()? {
            let Some(i) = declared.iter().position(|c| c.field() == key) else {
                let key = IntoDeserializer::<'de, M::Error>::into_deserializer(key);
                return seed.deserialize(key).map(Some);
            };
            if self.slots[i].is_some() {
                return Err(<M::Error as de::Error>::custom(format!("duplicate field `{key}`")));
            }
            let seed = SkeletonSeed(&self.skeleton.children()[i]);
            self.slots[i] = Some(self.map.next_value_seed(seed)?);
        }
        Ok(None)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, M::Error> {
        self.map.next_value_seed(seed)
    }
}

struct SequenceVisitor<'s, 't>(&'s [Skeleton<'t>]);

impl<'de> Visitor<'de> for SequenceVisitor<'_, '_> {
    type Value = Decoded;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an array of {} elements", self.0.len())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Decoded, A::Error> {
        let mut items = Vec::with_capacity(self.0.len());
        for (i, skeleton) in self.0.iter().enumerate() {
            match seq.next_element_seed(SkeletonSeed(skeleton))? {
                Some(item) => items.push(item),
                None => return Err(de::Error::invalid_length(i, &self)),
            }
        }
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(self.0.len() + 1, &self));
        }
        Ok(Decoded::Sequence(items))
    }
}
