//! Person records and the shapes they take on the way in and out of the
//! store.
//!
//! Empty strings and a zero age mean "absent" throughout; the store persists
//! them as-is rather than as `NULL`.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode a JSON `null` as the field's default, like an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ─── Stored ──────────────────────────────────────────────────────────────────

/// A person as persisted, with the identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:          i64,
  pub name:        String,
  pub surname:     String,
  pub patronymic:  String,
  pub age:         i32,
  pub gender:      String,
  pub nationality: String,
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// A person that has not been stored yet.
///
/// This is also the inbound body of `POST /add`, where only `name` is
/// meaningful; every field defaults so a bare `{"name":"..."}` decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewPerson {
  #[serde(deserialize_with = "null_as_default")]
  pub name:        String,
  #[serde(deserialize_with = "null_as_default")]
  pub surname:     String,
  #[serde(deserialize_with = "null_as_default")]
  pub patronymic:  String,
  #[serde(deserialize_with = "null_as_default")]
  pub age:         i32,
  #[serde(deserialize_with = "null_as_default")]
  pub gender:      String,
  #[serde(deserialize_with = "null_as_default")]
  pub nationality: String,
}

impl NewPerson {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }

  /// Overwrite the three predicted attributes with `enrichment`.
  ///
  /// All three are replaced together, so a person built this way never
  /// carries a partial prediction.
  pub fn enriched_with(self, enrichment: Enrichment) -> Self {
    Self {
      age: enrichment.age,
      gender: enrichment.gender,
      nationality: enrichment.nationality,
      ..self
    }
  }

  /// Attach the store-assigned `id`.
  pub fn into_person(self, id: i64) -> Person {
    Person {
      id,
      name:        self.name,
      surname:     self.surname,
      patronymic:  self.patronymic,
      age:         self.age,
      gender:      self.gender,
      nationality: self.nationality,
    }
  }
}

/// The merged outcome of a successful enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
  pub age:         i32,
  pub gender:      String,
  pub nationality: String,
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// A partial update. Empty strings and a zero age leave the stored value
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonPatch {
  #[serde(deserialize_with = "null_as_default")]
  pub name:        String,
  #[serde(deserialize_with = "null_as_default")]
  pub surname:     String,
  #[serde(deserialize_with = "null_as_default")]
  pub patronymic:  String,
  #[serde(deserialize_with = "null_as_default")]
  pub age:         i32,
  #[serde(deserialize_with = "null_as_default")]
  pub gender:      String,
  #[serde(deserialize_with = "null_as_default")]
  pub nationality: String,
}

impl PersonPatch {
  /// `true` when applying the patch would change nothing.
  pub fn is_empty(&self) -> bool {
    self.name.is_empty()
      && self.surname.is_empty()
      && self.patronymic.is_empty()
      && self.age == 0
      && self.gender.is_empty()
      && self.nationality.is_empty()
  }

  /// Apply the patch to `person` in memory.
  pub fn apply(&self, person: &mut Person) {
    fn set(slot: &mut String, value: &str) {
      if !value.is_empty() {
        *slot = value.to_owned();
      }
    }

    set(&mut person.name, &self.name);
    set(&mut person.surname, &self.surname);
    set(&mut person.patronymic, &self.patronymic);
    if self.age != 0 {
      person.age = self.age;
    }
    set(&mut person.gender, &self.gender);
    set(&mut person.nationality, &self.nationality);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bare_name_body_decodes() {
    let p: NewPerson = serde_json::from_str(r#"{"name":"Dmitriy"}"#).unwrap();
    assert_eq!(p, NewPerson::new("Dmitriy"));
  }

  #[test]
  fn enrichment_replaces_all_three_predictions() {
    let p = NewPerson {
      name: "Dmitriy".into(),
      surname: "Ushakov".into(),
      age: 99,
      ..NewPerson::default()
    }
    .enriched_with(Enrichment {
      age:         43,
      gender:      "male".into(),
      nationality: "UA".into(),
    });

    assert_eq!(p.surname, "Ushakov");
    assert_eq!(p.age, 43);
    assert_eq!(p.gender, "male");
    assert_eq!(p.nationality, "UA");
  }

  #[test]
  fn patch_skips_empty_fields() {
    let mut person = NewPerson {
      name: "Oleg".into(),
      surname: "Samsonov".into(),
      age: 29,
      gender: "Male".into(),
      ..NewPerson::default()
    }
    .into_person(1);

    let patch = PersonPatch { name: "Olegsandr".into(), ..PersonPatch::default() };
    assert!(!patch.is_empty());
    patch.apply(&mut person);

    assert_eq!(person.name, "Olegsandr");
    assert_eq!(person.surname, "Samsonov");
    assert_eq!(person.age, 29);
    assert_eq!(person.gender, "Male");
  }

  #[test]
  fn null_fields_decode_as_absent() {
    let p: NewPerson =
      serde_json::from_str(r#"{"name":"Dmitriy","surname":null,"age":null}"#).unwrap();
    assert_eq!(p, NewPerson::new("Dmitriy"));

    let patch: PersonPatch =
      serde_json::from_str(r#"{"name":null,"age":31,"gender":null}"#).unwrap();
    assert_eq!(patch, PersonPatch { age: 31, ..PersonPatch::default() });
  }

  #[test]
  fn default_patch_is_empty() {
    assert!(PersonPatch::default().is_empty());
  }
}
