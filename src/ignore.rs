use chrono::{DateTime, Utc};

use crate::de::{Map, Seq, Visitor};
use crate::error::Result;

impl<'de> dyn Visitor<'de> {
    /// Visitor accepting every supported element and discarding it.
    pub fn ignore<'a>() -> &'a mut dyn Visitor<'de> {
        Box::leak(Box::new(Ignore))
    }
}

struct Ignore;

impl<'de> Visitor<'de> for Ignore {
    fn double(&mut self, _n: f64) -> Result<()> {
        Ok(())
    }

    fn string(&mut self, _s: &'de str) -> Result<()> {
        Ok(())
    }

    fn binary(&mut self, _b: &'de [u8]) -> Result<()> {
        Ok(())
    }

    fn boolean(&mut self, _b: bool) -> Result<()> {
        Ok(())
    }

    fn datetime(&mut self, _dt: DateTime<Utc>) -> Result<()> {
        Ok(())
    }

    fn int32(&mut self, _n: i32) -> Result<()> {
        Ok(())
    }

    fn int64(&mut self, _n: i64) -> Result<()> {
        Ok(())
    }

    fn document(&mut self, m: &mut dyn Map<'de>) -> Result<()> {
        while m.next()?.is_some() {
            m.visit(<dyn Visitor>::ignore())?;
        }
        Ok(())
    }

    fn array(&mut self, s: &mut dyn Seq<'de>) -> Result<()> {
        while s.visit(<dyn Visitor>::ignore())? {}
        Ok(())
    }
}
