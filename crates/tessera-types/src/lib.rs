//! Type representations for Tessera
//!
//! Two layers live here:
//! - [`TypeSyntax`]: declared types exactly as written in source, used by the
//!   syntactic overload heuristics.
//! - [`StaticType`]: resolved types in terms of the target language, used when
//!   specializing overload groups.

pub mod equality;

pub use equality::types_equal;

/// Identifier of a nominal type declaration (stable for one compilation unit)
pub type TypeId = u32;

/// Keyword types of the source language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    Number,
    String,
    Boolean,
    Void,
    Null,
    Undefined,
    Any,
    Unknown,
    Never,
    Object,
}

/// Declared type syntax as written in source
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSyntax {
    /// `number`, `string`, ...
    Keyword(TypeKeyword),
    /// Named type reference, e.g. `char`, `List<int>`, `Array<string>`
    Reference {
        name: String,
        type_args: Vec<TypeSyntax>,
        /// Declaration the name was bound to, if the binder resolved it
        decl: Option<TypeId>,
    },
    /// `T[]`
    Array(Box<TypeSyntax>),
    /// `[A, B]`
    Tuple(Vec<TypeSyntax>),
    /// `A | B`
    Union(Vec<TypeSyntax>),
    /// `"literal"`
    StringLiteral(String),
    /// `42`
    NumberLiteral(f64),
}

impl TypeSyntax {
    /// Shorthand for an unresolved reference without type arguments
    pub fn named(name: impl Into<String>) -> Self {
        TypeSyntax::Reference {
            name: name.into(),
            type_args: Vec::new(),
            decl: None,
        }
    }

    pub fn array(elem: TypeSyntax) -> Self {
        TypeSyntax::Array(Box::new(elem))
    }

    /// Element type of `T[]` or `Array<T>` / `ReadonlyArray<T>`
    pub fn array_element(&self) -> Option<&TypeSyntax> {
        match self {
            TypeSyntax::Array(elem) => Some(elem),
            TypeSyntax::Reference { name, type_args, .. }
                if type_args.len() == 1 && (name == "Array" || name == "ReadonlyArray") =>
            {
                type_args.first()
            }
            _ => None,
        }
    }
}

/// Primitive (value) types of the target language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Double,
    Single,
    Int32,
    Int64,
    Boolean,
    String,
    Char,
}

impl Primitive {
    /// Fully qualified name of the canonical boxed/reference counterpart
    pub fn boxed_name(&self) -> &'static str {
        match self {
            Primitive::Double => "System.Double",
            Primitive::Single => "System.Single",
            Primitive::Int32 => "System.Int32",
            Primitive::Int64 => "System.Int64",
            Primitive::Boolean => "System.Boolean",
            Primitive::String => "System.String",
            Primitive::Char => "System.Char",
        }
    }

    /// Name of the boxed counterpart without its namespace
    pub fn short_boxed_name(&self) -> &'static str {
        let full = self.boxed_name();
        full.rsplit('.').next().unwrap_or(full)
    }

    /// Primitive spelled by a source type reference (`int`, `char`, ...)
    pub fn from_reference_name(name: &str) -> Option<Primitive> {
        match name {
            "double" => Some(Primitive::Double),
            "float" => Some(Primitive::Single),
            "int" => Some(Primitive::Int32),
            "long" => Some(Primitive::Int64),
            "bool" => Some(Primitive::Boolean),
            "char" => Some(Primitive::Char),
            _ => None,
        }
    }
}

/// Nominal type reference (class, interface, struct, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct NominalType {
    /// Stable identity of the declaration, when known
    pub id: Option<TypeId>,
    pub name: String,
    pub type_args: Vec<StaticType>,
}

/// Resolved static type
#[derive(Debug, Clone, PartialEq)]
pub enum StaticType {
    Primitive(Primitive),
    Array(Box<StaticType>),
    Tuple(Vec<StaticType>),
    Nominal(NominalType),
    Union(Vec<StaticType>),
    /// Unsubstituted type parameter
    TypeParam(String),
    Any,
    Unknown,
    Void,
    Null,
    /// Assigned to implementation parameters that the current signature does
    /// not declare. Equal to nothing, including itself.
    Absent,
}

impl StaticType {
    pub fn nominal(name: impl Into<String>) -> Self {
        StaticType::Nominal(NominalType {
            id: None,
            name: name.into(),
            type_args: Vec::new(),
        })
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, StaticType::Absent)
    }

    /// Lower declared type syntax to a static type.
    ///
    /// `type_params` lists the type parameter names in scope; references to
    /// them become [`StaticType::TypeParam`].
    pub fn from_syntax(syntax: &TypeSyntax, type_params: &[String]) -> StaticType {
        match syntax {
            TypeSyntax::Keyword(kw) => match kw {
                TypeKeyword::Number => StaticType::Primitive(Primitive::Double),
                TypeKeyword::String => StaticType::Primitive(Primitive::String),
                TypeKeyword::Boolean => StaticType::Primitive(Primitive::Boolean),
                TypeKeyword::Void | TypeKeyword::Undefined | TypeKeyword::Never => StaticType::Void,
                TypeKeyword::Null => StaticType::Null,
                TypeKeyword::Any | TypeKeyword::Object => StaticType::Any,
                TypeKeyword::Unknown => StaticType::Unknown,
            },
            TypeSyntax::StringLiteral(_) => StaticType::Primitive(Primitive::String),
            TypeSyntax::NumberLiteral(_) => StaticType::Primitive(Primitive::Double),
            TypeSyntax::Array(elem) => {
                StaticType::Array(Box::new(StaticType::from_syntax(elem, type_params)))
            }
            TypeSyntax::Tuple(elems) => StaticType::Tuple(
                elems.iter().map(|e| StaticType::from_syntax(e, type_params)).collect(),
            ),
            TypeSyntax::Union(members) => StaticType::Union(
                members.iter().map(|m| StaticType::from_syntax(m, type_params)).collect(),
            ),
            TypeSyntax::Reference { name, type_args, decl } => {
                if let Some(elem) = syntax.array_element() {
                    return StaticType::Array(Box::new(StaticType::from_syntax(elem, type_params)));
                }
                if type_args.is_empty() {
                    if type_params.iter().any(|p| p == name) {
                        return StaticType::TypeParam(name.clone());
                    }
                    if decl.is_none() {
                        if let Some(prim) = Primitive::from_reference_name(name) {
                            return StaticType::Primitive(prim);
                        }
                    }
                }
                StaticType::Nominal(NominalType {
                    id: *decl,
                    name: name.clone(),
                    type_args: type_args
                        .iter()
                        .map(|a| StaticType::from_syntax(a, type_params))
                        .collect(),
                })
            }
        }
    }
}

impl std::fmt::Display for StaticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaticType::Primitive(p) => write!(f, "{}", p.boxed_name()),
            StaticType::Array(elem) => write!(f, "{}[]", elem),
            StaticType::Tuple(elems) => {
                let parts: Vec<String> = elems.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            StaticType::Nominal(n) => {
                if n.type_args.is_empty() {
                    write!(f, "{}", n.name)
                } else {
                    let args: Vec<String> = n.type_args.iter().map(|a| a.to_string()).collect();
                    write!(f, "{}<{}>", n.name, args.join(", "))
                }
            }
            StaticType::Union(members) => {
                let parts: Vec<String> = members.iter().map(|m| m.to_string()).collect();
                write!(f, "{}", parts.join(" | "))
            }
            StaticType::TypeParam(name) => write!(f, "{}", name),
            StaticType::Any => write!(f, "any"),
            StaticType::Unknown => write!(f, "unknown"),
            StaticType::Void => write!(f, "void"),
            StaticType::Null => write!(f, "null"),
            StaticType::Absent => write!(f, "<absent>"),
        }
    }
}
