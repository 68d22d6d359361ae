// src/graph/node.rs
//! Node definitions for the visual program graph
//!
//! Every child slot is an explicit, typed field. Statement, declaration and
//! argument nodes carry the link to the next element of their chain; chains end
//! at the matching sentinel kind (`VoidStat`, `VarDeclVoid`, `ArgVoid`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside its [`Graph`](super::Graph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a node currently lives in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// Root node placed directly on a workspace (the only runnable state)
    RootDirectlyUnderWorkspace,
    /// Root node that is being dragged and is not attached to a workspace
    RootDangling,
    #[default]
    Child,
    Deleted,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeState::RootDirectlyUnderWorkspace => "root directly under workspace",
            NodeState::RootDangling => "dangling root",
            NodeState::Child => "child",
            NodeState::Deleted => "deleted",
        };
        f.write_str(name)
    }
}

/// A vertex of the program graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,

    #[serde(default)]
    pub state: NodeState,

    /// The node this one imitates (variable reads, function calls)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            state: NodeState::Child,
            original: None,
        }
    }

    /// Child slots in generation order
    pub fn children(&self) -> Vec<NodeId> {
        match &self.kind {
            NodeKind::VarDecl(decl) => vec![decl.next],
            NodeKind::Statement(stat) => {
                let mut slots = stat.stat.children();
                slots.push(stat.next);
                slots
            }
            NodeKind::Expression(exp) => exp.children(),
            NodeKind::Arg(arg) => vec![arg.value, arg.next],
            NodeKind::FuncDef(def) => vec![def.params, def.body],
            NodeKind::Event(event) => vec![event.body],
            NodeKind::VarDeclVoid | NodeKind::VoidStat | NodeKind::ArgVoid => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    VarDecl(VarDecl),
    /// End of a declaration chain
    VarDeclVoid,
    Statement(Statement),
    /// End of a statement chain
    VoidStat,
    Expression(Expression),
    Arg(Arg),
    /// End of an argument chain
    ArgVoid,
    FuncDef(FuncDef),
    Event(Event),
}

impl NodeKind {
    /// Short label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::VarDecl(_) => "variable declaration",
            NodeKind::VarDeclVoid => "end of declarations",
            NodeKind::Statement(_) => "statement",
            NodeKind::VoidStat => "end of statements",
            NodeKind::Expression(_) => "expression",
            NodeKind::Arg(_) => "argument",
            NodeKind::ArgVoid => "end of arguments",
            NodeKind::FuncDef(_) => "function definition",
            NodeKind::Event(_) => "event handler",
        }
    }
}

/// Element type of variables and lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElemType {
    Num,
    Str,
    Bool,
    Sound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarType {
    Var(ElemType),
    List(ElemType),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub ty: VarType,
    /// Name the user typed on the block
    pub name: String,
    pub next: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub stat: StatKind,
    pub next: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// target = value
    Assign { target: NodeId, value: NodeId },

    /// target += value
    AddAssign { target: NodeId, value: NodeId },

    /// if (cond) { then_stat } else { else_stat }
    If {
        cond: NodeId,
        then_stat: NodeId,
        #[serde(default)]
        else_stat: Option<NodeId>,
    },

    While { cond: NodeId, body: NodeId },

    /// Run `body` `count` times
    Repeat { count: NodeId, body: NodeId },

    /// Block with its own local declarations
    Compound { locals: NodeId, body: NodeId },

    Break,
    Continue,

    Return {
        #[serde(default)]
        value: Option<NodeId>,
    },

    PreDefCall(PreDefCall),

    /// Call of a user-defined function; the node's original is the definition
    FuncCall { args: NodeId },
}

impl StatKind {
    fn children(&self) -> Vec<NodeId> {
        match self {
            StatKind::Assign { target, value } | StatKind::AddAssign { target, value } => {
                vec![*target, *value]
            }
            StatKind::If {
                cond,
                then_stat,
                else_stat,
            } => {
                let mut slots = vec![*cond, *then_stat];
                slots.extend(else_stat.iter().copied());
                slots
            }
            StatKind::While { cond, body } => vec![*cond, *body],
            StatKind::Repeat { count, body } => vec![*count, *body],
            StatKind::Compound { locals, body } => vec![*locals, *body],
            StatKind::Break | StatKind::Continue => Vec::new(),
            StatKind::Return { value } => value.iter().copied().collect(),
            StatKind::PreDefCall(call) => call.args.clone(),
            StatKind::FuncCall { args } => vec![*args],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },

    Unary { op: UnaryOp, operand: NodeId },

    /// Variable read; the node's original is the declaration
    Var,

    Literal(Literal),

    PreDefCall(PreDefCall),

    /// Call of a user-defined function whose return value is used
    FuncCall { args: NodeId },
}

impl Expression {
    fn children(&self) -> Vec<NodeId> {
        match self {
            Expression::Binary { left, right, .. } => vec![*left, *right],
            Expression::Unary { operand, .. } => vec![*operand],
            Expression::Var => Vec::new(),
            Expression::Literal(Literal::FreqSound {
                frequency,
                duration,
            }) => vec![*frequency, *duration],
            Expression::Literal(_) => Vec::new(),
            Expression::PreDefCall(call) => call.args.clone(),
            Expression::FuncCall { args } => vec![*args],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    /// Four-operation arithmetic
    Arith(ArithOp),
    Mod,
    Logic(LogicOp),
    NumComp(CompOp),
    StrComp(CompOp),
    AppendStr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    /// Number as typed on the block
    Num(String),
    Str(String),
    /// Text shown on the boolean block
    Bool(String),
    LineFeed,
    EmptyList(ElemType),
    /// Sound of a given frequency (Hz) and duration (seconds)
    FreqSound { frequency: NodeId, duration: NodeId },
    /// Silent sound placeholder
    NilSound,
}

/// Call of a function provided by the runtime library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreDefCall {
    pub func: PreDefFunc,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<FuncOption>,

    /// Positional arguments (arg0, arg1, ...)
    #[serde(default)]
    pub args: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreDefFunc {
    NumToStr,
    StrToNum,
    BoolToStr,
    Scan,
    RandomInt,
    NumRound,
    Abs,
    MaxMin,
    MeasureDistance,
    Melody,
    Print,
    PrintNum,
    Move,
    Sleep,
    PlayMelody,
    PlaySoundList,
    Say,
    Array { elem: ElemType, op: ArrayOp },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayOp {
    Push,
    Pop,
    Insert,
    Remove,
    Append,
    Clear,
    Set,
    Get,
    GetLast,
    Length,
}

/// Sub-option selected on an overloaded predefined function block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuncOption {
    Round,
    Ceil,
    Floor,
    Max,
    Min,
    MoveForward,
    MoveBackward,
    TurnRight,
    TurnLeft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    pub value: NodeId,
    pub next: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDef {
    /// Name the user typed on the block
    pub name: String,
    /// Head of the parameter declaration chain
    pub params: NodeId,
    /// Head of the body statement chain
    pub body: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<VarType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub trigger: EventTrigger,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTrigger {
    /// Key name as shown on the block (`A`, `SPACE`, `DIGIT1`, ...)
    KeyPressed(String),
    /// Seconds to wait after the program starts
    DelayedStart(String),
}
