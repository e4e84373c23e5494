//! Diffie-Hellman style key agreement on a toy curve.

use crate::arithmetic::{GroupLaw, Point};
use crate::order::point_order;
use crate::CurveError;

use rand_core::{CryptoRng, RngCore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keypair {
    privkey: u64,
    pubkey: Point,
}

impl Keypair {
    /// `pubkey = privkey * generator`
    pub fn new(law: &GroupLaw, generator: &Point, privkey: u64) -> Result<Self, CurveError> {
        if privkey == 0 {
            return Err(CurveError::InvalidParameter(
                "private key must be nonzero".to_string(),
            ));
        }
        if generator.is_identity() {
            return Err(CurveError::InvalidParameter(
                "the identity cannot be used as a generator".to_string(),
            ));
        }
        law.ensure_on_curve(generator)?;
        let pubkey = law.scalar_mul(privkey, generator)?;
        Ok(Self { privkey, pubkey })
    }

    /// Private key drawn uniformly from `[1, n)` where `n` is the order of
    /// `generator`.
    pub fn random<R: RngCore + CryptoRng>(
        rng: &mut R,
        law: &GroupLaw,
        generator: &Point,
    ) -> Result<Self, CurveError> {
        let order = point_order(law, generator)?;
        if order < 2 {
            return Err(CurveError::InvalidParameter(
                "the identity cannot be used as a generator".to_string(),
            ));
        }
        let privkey = 1 + rng.next_u64() % (order - 1);
        Self::new(law, generator, privkey)
    }

    pub fn privkey(&self) -> u64 {
        self.privkey
    }

    pub fn pubkey(&self) -> &Point {
        &self.pubkey
    }

    /// `privkey * peer`, after checking that the peer key is on the curve.
    pub fn shared_secret(&self, law: &GroupLaw, peer: &Point) -> Result<Point, CurveError> {
        law.ensure_on_curve(peer)?;
        law.scalar_mul(self.privkey, peer)
    }
}
