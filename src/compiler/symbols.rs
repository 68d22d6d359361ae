// src/compiler/symbols.rs
//! Symbol catalog: how block-level kinds map onto JavaScript text

use crate::graph::{
    ArithOp, ArrayOp, BinaryOp, CompOp, ElemType, EventTrigger, FuncOption, LogicOp, PreDefFunc,
    UnaryOp, VarType,
};

/// JavaScript keywords and punctuation used by the generators
pub mod js {
    pub const LET: &str = "let ";
    pub const CONST: &str = "const ";
    pub const FUNCTION: &str = "function ";
    pub const IF: &str = "if ";
    pub const ELSE: &str = "else ";
    pub const WHILE: &str = "while ";
    pub const FOR: &str = "for ";
    pub const TRY: &str = "try ";
    pub const FINALLY: &str = "finally ";
    pub const BREAK: &str = "break;";
    pub const CONTINUE: &str = "continue;";
    pub const RETURN: &str = "return";
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
    pub const UNDEFINED: &str = "undefined";
    pub const INDENT: &str = "\t";
}

/// Identifiers owned by the generated program and its runtime library
pub mod ident {
    pub const VAR_PREFIX: &str = "_v";
    pub const FUNC_PREFIX: &str = "_f";
    pub const LOCK_PREFIX: &str = "_lock";
    pub const IS_FINITE: &str = "isFinite";
    pub const FLOOR: &str = "Math.floor";
    pub const NIL_SOUND: &str = "_nilSound";
    pub const CREATE_SOUND: &str = "_createSound";
    pub const CALL_STACK: &str = "_callStack";
    pub const ADD_EVENT: &str = "_addEvent";
    pub const GEN_LOCK_OBJ: &str = "_genLockObj";
    pub const TRY_LOCK: &str = "_tryLock";
    pub const UNLOCK: &str = "_unlock";
    pub const SLEEP: &str = "_sleep";
    pub const START_EVENT: &str = "PROGRAM_START";
}

pub fn binary_operator(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Arith(ArithOp::Add) | BinaryOp::AppendStr => " + ",
        BinaryOp::Arith(ArithOp::Sub) => " - ",
        BinaryOp::Arith(ArithOp::Mul) => " * ",
        BinaryOp::Arith(ArithOp::Div) => " / ",
        BinaryOp::Mod => " % ",
        BinaryOp::Logic(LogicOp::And) => " && ",
        BinaryOp::Logic(LogicOp::Or) => " || ",
        BinaryOp::NumComp(op) | BinaryOp::StrComp(op) => comp_operator(op),
    }
}

fn comp_operator(op: CompOp) -> &'static str {
    match op {
        CompOp::Eq => " === ",
        CompOp::Neq => " !== ",
        CompOp::Lt => " < ",
        CompOp::Lte => " <= ",
        CompOp::Gt => " > ",
        CompOp::Gte => " >= ",
    }
}

/// Operators whose result may be a non-finite number
pub fn is_arith_exception(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Arith(_) | BinaryOp::Mod)
}

pub fn unary_operator(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Not => "!",
        UnaryOp::Neg => "-",
    }
}

/// Initial value of a freshly declared variable
pub fn default_value(ty: VarType) -> &'static str {
    match ty {
        VarType::Var(elem) => elem_default(elem),
        VarType::List(_) => "[]",
    }
}

fn elem_default(elem: ElemType) -> &'static str {
    match elem {
        ElemType::Num => "0",
        ElemType::Str => "''",
        ElemType::Bool => js::FALSE,
        ElemType::Sound => ident::NIL_SOUND,
    }
}

/// Text on a boolean block mapped to its JavaScript literal
pub fn bool_literal(text: &str) -> Option<&'static str> {
    match text {
        "true" | "真" => Some(js::TRUE),
        "false" | "偽" => Some(js::FALSE),
        _ => None,
    }
}

/// Runtime function implementing a predefined block
pub fn predef_func_name(func: PreDefFunc, option: Option<FuncOption>) -> Option<&'static str> {
    let name = match (func, option) {
        (PreDefFunc::NumToStr, None) => "String",
        (PreDefFunc::StrToNum, None) => "_strToNum",
        (PreDefFunc::BoolToStr, None) => "_boolToStr",
        (PreDefFunc::Scan, None) => "_scan",
        (PreDefFunc::RandomInt, None) => "_randomInt",
        (PreDefFunc::NumRound, Some(FuncOption::Round)) => "Math.round",
        (PreDefFunc::NumRound, Some(FuncOption::Ceil)) => "Math.ceil",
        (PreDefFunc::NumRound, Some(FuncOption::Floor)) => "Math.floor",
        (PreDefFunc::Abs, None) => "Math.abs",
        (PreDefFunc::MaxMin, Some(FuncOption::Max)) => "Math.max",
        (PreDefFunc::MaxMin, Some(FuncOption::Min)) => "Math.min",
        (PreDefFunc::MeasureDistance, None) => "_measureDistance",
        (PreDefFunc::Melody, None) => "_pushSound",
        (PreDefFunc::Print, None) | (PreDefFunc::PrintNum, None) => "_println",
        (PreDefFunc::Move, Some(FuncOption::MoveForward)) => "_moveForward",
        (PreDefFunc::Move, Some(FuncOption::MoveBackward)) => "_moveBackward",
        (PreDefFunc::Move, Some(FuncOption::TurnRight)) => "_turnRight",
        (PreDefFunc::Move, Some(FuncOption::TurnLeft)) => "_turnLeft",
        (PreDefFunc::Sleep, None) => ident::SLEEP,
        (PreDefFunc::PlayMelody, None) | (PreDefFunc::PlaySoundList, None) => "_playMelodies",
        (PreDefFunc::Say, None) => "_say",
        (PreDefFunc::Array { op, .. }, None) => array_func_name(op),
        _ => return None,
    };
    Some(name)
}

fn array_func_name(op: ArrayOp) -> &'static str {
    match op {
        ArrayOp::Push => "_aryPush",
        ArrayOp::Pop => "_aryPop",
        ArrayOp::Insert => "_aryInsert",
        ArrayOp::Remove => "_aryRemove",
        ArrayOp::Append => "_aryAddAll",
        ArrayOp::Clear => "_aryClear",
        ArrayOp::Set => "_arySet",
        ArrayOp::Get => "_aryGet",
        ArrayOp::GetLast => "_aryGetLast",
        ArrayOp::Length => "_aryLength",
    }
}

/// Number of argument slots a predefined block has
pub fn predef_arity(func: PreDefFunc) -> usize {
    match func {
        PreDefFunc::MeasureDistance => 0,
        PreDefFunc::NumToStr
        | PreDefFunc::StrToNum
        | PreDefFunc::BoolToStr
        | PreDefFunc::Scan
        | PreDefFunc::NumRound
        | PreDefFunc::Abs
        | PreDefFunc::Print
        | PreDefFunc::PrintNum
        | PreDefFunc::Sleep
        | PreDefFunc::PlayMelody
        | PreDefFunc::PlaySoundList
        | PreDefFunc::Say => 1,
        PreDefFunc::RandomInt | PreDefFunc::MaxMin | PreDefFunc::Melody | PreDefFunc::Move => 2,
        PreDefFunc::Array { op, .. } => match op {
            ArrayOp::Pop | ArrayOp::Clear | ArrayOp::GetLast | ArrayOp::Length => 1,
            ArrayOp::Push | ArrayOp::Remove | ArrayOp::Append | ArrayOp::Get => 2,
            ArrayOp::Insert | ArrayOp::Set => 3,
        },
    }
}

/// Whether a predefined block can be used as a value
pub fn predef_returns_value(func: PreDefFunc) -> bool {
    match func {
        PreDefFunc::Print
        | PreDefFunc::PrintNum
        | PreDefFunc::Move
        | PreDefFunc::Sleep
        | PreDefFunc::PlayMelody
        | PreDefFunc::PlaySoundList
        | PreDefFunc::Say => false,
        PreDefFunc::Array { op, .. } => {
            matches!(op, ArrayOp::Get | ArrayOp::GetLast | ArrayOp::Length)
        }
        _ => true,
    }
}

/// Value substituted when a list read yields `undefined`
pub fn undefined_substitute(func: PreDefFunc) -> Option<&'static str> {
    match func {
        PreDefFunc::Array {
            elem,
            op: ArrayOp::Get | ArrayOp::GetLast,
        } => Some(elem_default(elem)),
        _ => None,
    }
}

const KEY_NAMES: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z", "DIGIT0", "DIGIT1", "DIGIT2", "DIGIT3", "DIGIT4", "DIGIT5",
    "DIGIT6", "DIGIT7", "DIGIT8", "DIGIT9", "SPACE", "ENTER", "SHIFT", "CTRL", "UP", "DOWN",
    "LEFT", "RIGHT",
];

/// Runtime event name an event handler is registered for
pub fn event_name(trigger: &EventTrigger) -> Option<String> {
    match trigger {
        EventTrigger::KeyPressed(key) => {
            let key = key.to_ascii_uppercase();
            KEY_NAMES
                .contains(&key.as_str())
                .then(|| format!("KEY_{key}_PRESSED"))
        }
        EventTrigger::DelayedStart(_) => Some(ident::START_EVENT.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_tokens() {
        assert_eq!(binary_operator(BinaryOp::Arith(ArithOp::Div)), " / ");
        assert_eq!(binary_operator(BinaryOp::StrComp(CompOp::Neq)), " !== ");
        assert_eq!(binary_operator(BinaryOp::AppendStr), " + ");
        assert_eq!(unary_operator(UnaryOp::Not), "!");
    }

    #[test]
    fn test_arith_exception_subset() {
        assert!(is_arith_exception(BinaryOp::Mod));
        assert!(is_arith_exception(BinaryOp::Arith(ArithOp::Mul)));
        assert!(!is_arith_exception(BinaryOp::AppendStr));
        assert!(!is_arith_exception(BinaryOp::NumComp(CompOp::Lt)));
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_value(VarType::Var(ElemType::Num)), "0");
        assert_eq!(default_value(VarType::Var(ElemType::Str)), "''");
        assert_eq!(default_value(VarType::Var(ElemType::Sound)), "_nilSound");
        assert_eq!(default_value(VarType::List(ElemType::Bool)), "[]");
    }

    #[test]
    fn test_predef_names_need_matching_option() {
        assert_eq!(
            predef_func_name(PreDefFunc::NumRound, Some(FuncOption::Ceil)),
            Some("Math.ceil")
        );
        assert_eq!(predef_func_name(PreDefFunc::NumRound, None), None);
        assert_eq!(
            predef_func_name(PreDefFunc::Print, Some(FuncOption::Max)),
            None
        );
    }

    #[test]
    fn test_undefined_substitute_only_for_reads() {
        let get = PreDefFunc::Array {
            elem: ElemType::Str,
            op: ArrayOp::Get,
        };
        let push = PreDefFunc::Array {
            elem: ElemType::Str,
            op: ArrayOp::Push,
        };
        assert_eq!(undefined_substitute(get), Some("''"));
        assert_eq!(undefined_substitute(push), None);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(
            event_name(&EventTrigger::KeyPressed("a".to_string())).as_deref(),
            Some("KEY_A_PRESSED")
        );
        assert_eq!(
            event_name(&EventTrigger::DelayedStart("1.5".to_string())).as_deref(),
            Some("PROGRAM_START")
        );
        assert_eq!(event_name(&EventTrigger::KeyPressed("F13".to_string())), None);
        assert_eq!(
            event_name(&EventTrigger::KeyPressed("CTRL".to_string())).as_deref(),
            Some("KEY_CTRL_PRESSED")
        );
        assert_eq!(event_name(&EventTrigger::KeyPressed("CONTROL".to_string())), None);
    }

    #[test]
    fn test_bool_literal_table() {
        assert_eq!(bool_literal("真"), Some("true"));
        assert_eq!(bool_literal("false"), Some("false"));
        assert_eq!(bool_literal("yes"), None);
    }
}
