use super::expr::TypeExpr;

/// One field of a collected struct, with its canonical type rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldToken {
    pub name: String,
    pub typ: String,
}

/// One struct declaration surviving collection and filtering.
///
/// `selector` is the final segment of `namespace`, used to qualify the
/// struct in generated code. Field order is declaration order; consumers
/// rely on it as the positional row contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructToken {
    pub namespace: String,
    pub selector: String,
    pub name: String,
    pub fields: Vec<FieldToken>,
}

/// A single field-declaration line as exposed by the parser: one or more
/// names sharing one type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLine {
    pub names: Vec<String>,
    pub ty: TypeExpr,
}
