mod blocks;
mod boolean;
mod discriminant;
mod int;
mod length_delimited;
mod record;
mod timestamp;

pub(super) use {
	blocks::*, boolean::*, discriminant::*, int::*, length_delimited::*, record::*, timestamp::*,
};

use super::*;
