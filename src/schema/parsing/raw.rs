//! Schema JSON as written, before names are resolved

use {serde::de::*, std::borrow::Cow};

/// A schema is a type name or reference, a union (JSON array), or an object
pub(super) enum SchemaNode<'a> {
	Type(Type),
	Ref(Cow<'a, str>),
	Object(Box<SchemaObject<'a>>),
	Union(Vec<SchemaNode<'a>>),
}

#[derive(serde_derive::Deserialize, Clone, Copy, Debug)]
#[serde(rename_all = "kebab-case")]
pub(super) enum Type {
	Null,
	Boolean,
	Int,
	Long,
	Float,
	Double,
	Bytes,
	String,
	Array,
	Map,
	Record,
	Enum,
	Fixed,
}

/// Which properties are required depends on `type_`, so they are all
/// optional here and checked while building the tree
#[derive(serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound = "'a: 'de, 'de: 'a")]
pub(super) struct SchemaObject<'a> {
	#[serde(rename = "type")]
	pub(super) type_: SchemaNode<'a>,
	pub(super) logical_type: Option<JsonStr<'a>>,
	pub(super) name: Option<JsonStr<'a>>,
	pub(super) namespace: Option<JsonStr<'a>>,
	pub(super) fields: Option<Vec<Field<'a>>>,
	pub(super) symbols: Option<Vec<JsonStr<'a>>>,
	pub(super) items: Option<SchemaNode<'a>>,
	pub(super) values: Option<SchemaNode<'a>>,
	pub(super) size: Option<usize>,
}

#[derive(serde_derive::Deserialize)]
#[serde(bound = "'a: 'de")]
pub(super) struct Field<'a> {
	#[serde(borrow)]
	pub(super) name: JsonStr<'a>,
	#[serde(rename = "type")]
	pub(super) type_: SchemaNode<'a>,
	/// Non-standard: the `long` holds nanoseconds since the Unix epoch
	#[serde(default)]
	pub(super) is_datetime: bool,
}

/// Borrowed from the input unless it contains escapes
#[derive(serde_derive::Deserialize)]
pub(super) struct JsonStr<'a>(#[serde(borrow)] pub(super) Cow<'a, str>);

impl<'a> SchemaNode<'a> {
	/// A bare string is either a primitive type name or a reference to a
	/// named type defined earlier
	fn type_or_ref(name: Cow<'a, str>) -> Self {
		match Type::deserialize(value::StrDeserializer::<NotAType>::new(&name)) {
			Ok(type_) => SchemaNode::Type(type_),
			Err(NotAType) => SchemaNode::Ref(name),
		}
	}
}

impl<'de> Deserialize<'de> for SchemaNode<'de> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct RawSchemaVisitor<'de>(std::marker::PhantomData<&'de ()>);
		impl<'de> Visitor<'de> for RawSchemaVisitor<'de> {
			type Value = SchemaNode<'de>;

			fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(
					formatter,
					"a type name, a named type reference, an array of schemas (union) or an \
						object with a `type` property"
				)
			}

			fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
			where
				A: MapAccess<'de>,
			{
				Ok(SchemaNode::Object(Deserialize::deserialize(
					value::MapAccessDeserializer::new(map),
				)?))
			}

			fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
			where
				A: SeqAccess<'de>,
			{
				Ok(SchemaNode::Union(Deserialize::deserialize(
					value::SeqAccessDeserializer::new(seq),
				)?))
			}

			fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(SchemaNode::type_or_ref(Cow::Owned(v.to_owned())))
			}

			fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(SchemaNode::type_or_ref(Cow::Borrowed(v)))
			}

			fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
			where
				E: Error,
			{
				Ok(SchemaNode::type_or_ref(Cow::Owned(v)))
			}
		}
		deserializer.deserialize_any(RawSchemaVisitor(std::marker::PhantomData))
	}
}

#[derive(thiserror::Error, Debug)]
#[error("Not a type name")]
struct NotAType;
impl Error for NotAType {
	fn custom<T: std::fmt::Display>(_msg: T) -> Self {
		NotAType
	}
}
