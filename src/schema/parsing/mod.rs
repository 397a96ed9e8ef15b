mod raw;

use crate::schema::*;

use std::collections::HashMap;

const TIMESTAMP_NANOS: &str = "timestamp-nanos";

/// Named references are inlined, so a schema that references a type several
/// times per level expands exponentially. Past this many nodes, construction
/// fails.
const MAX_SCHEMA_NODES: usize = 100_000;

/// Parse the schema JSON into the root node of the tree, also returning the
/// minified JSON
pub(super) fn parse_schema(s: &str) -> Result<(SchemaNode, String), SchemaError> {
	let raw_schema: raw::SchemaNode = serde_json::from_str(s)?;

	let mut state = SchemaConstructionState {
		names: HashMap::new(),
		n_nodes: 0,
	};
	let root = state.register_node(&raw_schema, None)?;

	let schema_json = String::from_utf8({
		// Sanitize & minify json, preserving all keys.
		let mut serializer = serde_json::Serializer::new(Vec::new());
		serde_transcode::transcode(&mut serde_json::Deserializer::from_str(s), &mut serializer)?;
		serializer.into_inner()
	})
	.map_err(|e| {
		SchemaError::msg(format_args!(
			"serde_json should not emit invalid UTF-8 but got {e}"
		))
	})?;

	Ok((root, schema_json))
}

struct SchemaConstructionState<'a> {
	/// `None` while the named type is still being defined: encountering a
	/// reference to it at that point means the schema is recursive
	///
	/// Otherwise holds the node and the size of its subtree.
	names: HashMap<NameKey<'a>, Option<(SchemaNode, usize)>>,
	/// Nodes of the tree built so far, inlined references included
	n_nodes: usize,
}

impl<'a> SchemaConstructionState<'a> {
	fn register_node(
		&mut self,
		raw_schema: &'a raw::SchemaNode<'a>,
		enclosing_namespace: Option<&'a str>,
	) -> Result<SchemaNode, SchemaError> {
		if !matches!(*raw_schema, raw::SchemaNode::Ref(_)) {
			self.n_nodes += 1;
			check_node_count(self.n_nodes)?;
		}
		Ok(match *raw_schema {
			raw::SchemaNode::Type(type_) => match type_ {
				raw::Type::Null => SchemaNode::Null,
				raw::Type::Boolean => SchemaNode::Boolean,
				raw::Type::Int => SchemaNode::Int,
				raw::Type::Long => SchemaNode::Long,
				raw::Type::Float => SchemaNode::Float,
				raw::Type::Double => SchemaNode::Double,
				raw::Type::Bytes => SchemaNode::Bytes,
				raw::Type::String => SchemaNode::String,
				complex_type @ (raw::Type::Array
				| raw::Type::Map
				| raw::Type::Record
				| raw::Type::Enum
				| raw::Type::Fixed) => {
					return Err(SchemaError::msg(format_args!(
						"Expected primitive type name, but got {:?} as type which is a complex \
							type, so should be in an object.",
						complex_type
					)))
				}
			},
			raw::SchemaNode::Union(ref union_schemas) => SchemaNode::Union(Union {
				variants: union_schemas
					.iter()
					.map(|schema| self.register_node(schema, enclosing_namespace))
					.collect::<Result<_, _>>()?,
			}),
			raw::SchemaNode::Ref(ref reference) => {
				let name_key = NameKey::from_reference(reference, enclosing_namespace);
				match self.names.get(&name_key) {
					Some(Some((node, n_nodes))) => {
						let n_nodes = *n_nodes;
						check_node_count(self.n_nodes + n_nodes)?;
						let node = node.clone();
						self.n_nodes += n_nodes;
						node
					}
					Some(None) => {
						return Err(SchemaError::msg(format_args!(
							"The Schema contains a reference to {} from within its own \
								definition: recursive schemas are not supported",
							name_key
						)))
					}
					None => {
						return Err(SchemaError::msg(format_args!(
							"The Schema contains an unknown reference: {} (named types have \
								to be defined before they are referenced)",
							name_key
						)))
					}
				}
			}
			raw::SchemaNode::Object(ref object) => {
				let node = self.register_object(object, enclosing_namespace)?;
				if let Some(ref logical_type) = object.logical_type {
					if &*logical_type.0 == TIMESTAMP_NANOS && !matches!(node, SchemaNode::Long) {
						return Err(SchemaError::msg(format_args!(
							"Logical type {TIMESTAMP_NANOS} can only annotate a long, but got {:?}",
							node
						)));
					}
				}
				node
			}
		})
	}

	fn register_object(
		&mut self,
		object: &'a raw::SchemaObject<'a>,
		enclosing_namespace: Option<&'a str>,
	) -> Result<SchemaNode, SchemaError> {
		// This object's own node was counted by the caller
		let first_node = self.n_nodes;
		macro_rules! field {
			($type_: ident $name: ident) => {
				match &object.$name {
					Some(v) => v,
					_ => {
						return Err(SchemaError::msg(format_args!(
							concat!("Missing field `", stringify!($name), "` on type {:?}",),
							$type_
						)));
					}
				}
			};
		}
		Ok(match object.type_ {
			raw::SchemaNode::Type(t @ raw::Type::Array) => SchemaNode::Array(Box::new(
				self.register_node(field!(t items), enclosing_namespace)?,
			)),
			raw::SchemaNode::Type(t @ raw::Type::Map) => SchemaNode::Map(Box::new(
				self.register_node(field!(t values), enclosing_namespace)?,
			)),
			raw::SchemaNode::Type(t @ raw::Type::Enum) => {
				let name_key = self.start_definition(object, t, enclosing_namespace)?;
				let node = SchemaNode::Enum(Enum {
					name: name_key.name(),
					symbols: field!(t symbols)
						.iter()
						.map(|e| (*e.0).to_owned())
						.collect(),
				});
				self.finish_definition(name_key, node, first_node)
			}
			raw::SchemaNode::Type(t @ raw::Type::Fixed) => {
				let name_key = self.start_definition(object, t, enclosing_namespace)?;
				let node = SchemaNode::Fixed(Fixed {
					name: name_key.name(),
					size: *field!(t size),
				});
				self.finish_definition(name_key, node, first_node)
			}
			raw::SchemaNode::Type(t @ raw::Type::Record) => {
				let name_key = self.start_definition(object, t, enclosing_namespace)?;
				let node = SchemaNode::Record(Record {
					fields: field!(t fields)
						.iter()
						.map(|field| {
							Ok(RecordField {
								name: (*field.name.0).to_owned(),
								schema: self.register_node(&field.type_, name_key.namespace)?,
								is_datetime: field.is_datetime || is_timestamp_nanos(&field.type_),
							})
						})
						.collect::<Result<_, SchemaError>>()?,
					name: name_key.name(),
				});
				self.finish_definition(name_key, node, first_node)
			}
			ref inner_type @ (raw::SchemaNode::Type(
				raw::Type::Null
				| raw::Type::Boolean
				| raw::Type::Int
				| raw::Type::Long
				| raw::Type::Float
				| raw::Type::Double
				| raw::Type::Bytes
				| raw::Type::String,
			)
			| raw::SchemaNode::Ref(_)
			| raw::SchemaNode::Object(_)
			| raw::SchemaNode::Union(_)) => {
				// We have to allow {"type": {"type": "string"}} and
				// {"type": "long", "logicalType": "..."}, but complex type
				// properties set at this level would be silently ignored.
				match *object {
					raw::SchemaObject {
						type_: _,
						logical_type: _,
						name: _,
						ref namespace,
						fields: None,
						symbols: None,
						items: None,
						values: None,
						size: None,
					} => self.register_node(
						inner_type,
						match namespace {
							Some(namespace) => Some(&*namespace.0).filter(|&s| !s.is_empty()),
							None => enclosing_namespace,
						},
					)?,
					_ => {
						return Err(SchemaError::new(
							"Got unnecessarily-nested type, but local object properties are set \
								- those would be ignored",
						))
					}
				}
			}
		})
	}

	/// Reserve the name of a named type, so that references to it from within
	/// its own definition can be detected
	fn start_definition(
		&mut self,
		object: &'a raw::SchemaObject<'a>,
		type_: raw::Type,
		enclosing_namespace: Option<&'a str>,
	) -> Result<NameKey<'a>, SchemaError> {
		let name: &'a str = match object.name {
			Some(ref name) => &*name.0,
			None => {
				return Err(SchemaError::msg(format_args!(
					"Missing name for type {:?}",
					type_
				)))
			}
		};
		let name_key = match name.rsplit_once('.') {
			Some((namespace, name)) => NameKey {
				namespace: Some(namespace).filter(|&s| !s.is_empty()),
				name,
			},
			None => NameKey {
				namespace: match object.namespace {
					// If the object explicitly specifies an empty string
					// as namespace, "this indicates the null namespace"
					// (aka no namespace)
					Some(ref namespace) => Some(&*namespace.0).filter(|&s| !s.is_empty()),
					None => enclosing_namespace,
				},
				name,
			},
		};
		if self.names.insert(name_key, None).is_some() {
			return Err(SchemaError::msg(format_args!(
				"The Schema contains duplicate definitions for {}",
				name_key
			)));
		}
		Ok(name_key)
	}

	fn finish_definition(
		&mut self,
		name_key: NameKey<'a>,
		node: SchemaNode,
		first_node: usize,
	) -> SchemaNode {
		let n_nodes = self.n_nodes - first_node + 1;
		self.names.insert(name_key, Some((node.clone(), n_nodes)));
		node
	}
}

fn check_node_count(n_nodes: usize) -> Result<(), SchemaError> {
	if n_nodes > MAX_SCHEMA_NODES {
		return Err(SchemaError::msg(format_args!(
			"The Schema expands to more than {MAX_SCHEMA_NODES} nodes once named \
				references are inlined"
		)));
	}
	Ok(())
}

fn is_timestamp_nanos(raw_schema: &raw::SchemaNode<'_>) -> bool {
	match raw_schema {
		raw::SchemaNode::Object(object) => object
			.logical_type
			.as_ref()
			.map_or(false, |logical_type| &*logical_type.0 == TIMESTAMP_NANOS),
		_ => false,
	}
}

#[derive(PartialEq, Eq, Hash, Clone, Copy)]
struct NameKey<'a> {
	namespace: Option<&'a str>,
	name: &'a str,
}
impl<'a> NameKey<'a> {
	fn from_reference(reference: &'a str, enclosing_namespace: Option<&'a str>) -> Self {
		match reference.rsplit_once('.') {
			Some((namespace, name)) => NameKey {
				namespace: Some(namespace).filter(|&s| !s.is_empty()),
				name,
			},
			None => NameKey {
				namespace: enclosing_namespace,
				name: reference,
			},
		}
	}

	fn name(&self) -> Name {
		match self.namespace {
			None => Name {
				fully_qualified_name: self.name.to_owned(),
				namespace_delimiter_idx: None,
			},
			Some(namespace) => Name {
				fully_qualified_name: format!("{}.{}", namespace, self.name),
				namespace_delimiter_idx: Some(namespace.len()),
			},
		}
	}
}
impl std::fmt::Display for NameKey<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.namespace {
			None => self.name.fmt(f),
			Some(namespace) => write!(f, "{}.{}", namespace, self.name),
		}
	}
}
