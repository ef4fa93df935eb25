//! Gauss-Kronrod node and weight tables
//!
//! Nodes are the non-negative abscissae on `[-1, 1]` in descending order with
//! the centre last. Gauss nodes sit at the odd positions; the Gauss rule uses
//! the centre only when it has an odd number of points.

use super::{Estimate, QuadratureError};

/// A Gauss-Kronrod pair with pre-computed nodes and weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KronrodRule {
    /// Short name of the pair, e.g. `"G7K15"`
    pub name: &'static str,
    /// Kronrod abscissae (positive half, descending, centre last)
    pub nodes: &'static [f64],
    /// Kronrod weights, aligned with `nodes`
    pub kronrod_weights: &'static [f64],
    /// Gauss weights for the odd-indexed nodes (and the centre, if used)
    pub gauss_weights: &'static [f64],
}

const K15_NODES: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_838_258_730,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const K15_WEIGHTS: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

const G7_WEIGHTS: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

const K21_NODES: [f64; 11] = [
    0.995_657_163_025_808_080_735_527_280_689_003,
    0.973_906_528_517_171_720_077_964_012_084_452,
    0.930_157_491_355_708_226_001_207_180_059_508,
    0.865_063_366_688_984_510_732_096_688_423_493,
    0.780_817_726_586_416_897_063_717_578_345_042,
    0.679_409_568_299_024_406_234_327_365_114_874,
    0.562_757_134_668_604_683_339_000_099_272_694,
    0.433_395_394_129_247_190_799_265_943_165_784,
    0.294_392_862_701_460_198_131_126_603_103_866,
    0.148_874_338_981_631_210_884_826_001_129_720,
    0.0,
];

const K21_WEIGHTS: [f64; 11] = [
    0.011_694_638_867_371_874_278_064_396_062_192,
    0.032_558_162_307_964_727_478_818_972_459_390,
    0.054_755_896_574_351_996_031_381_300_244_580,
    0.075_039_674_810_919_952_767_043_140_916_190,
    0.093_125_454_583_697_605_535_065_465_083_366,
    0.109_387_158_802_297_641_899_210_590_325_805,
    0.123_491_976_262_065_851_077_208_259_279_758,
    0.134_709_217_311_473_325_928_054_001_771_707,
    0.142_775_938_577_060_080_797_094_273_138_717,
    0.147_739_104_901_338_491_374_841_515_972_068,
    0.149_445_554_002_916_905_664_936_468_389_821,
];

const G10_WEIGHTS: [f64; 5] = [
    0.066_671_344_308_688_137_593_568_809_893_332,
    0.149_451_349_150_580_593_145_776_339_657_697,
    0.219_086_362_515_982_043_995_534_934_228_163,
    0.269_266_719_309_996_355_091_226_921_569_469,
    0.295_524_224_714_752_870_173_892_994_651_338,
];

impl KronrodRule {
    /// 7-point Gauss, 15-point Kronrod
    pub const G7K15: KronrodRule = KronrodRule {
        name: "G7K15",
        nodes: &K15_NODES,
        kronrod_weights: &K15_WEIGHTS,
        gauss_weights: &G7_WEIGHTS,
    };

    /// 10-point Gauss, 21-point Kronrod
    pub const G10K21: KronrodRule = KronrodRule {
        name: "G10K21",
        nodes: &K21_NODES,
        kronrod_weights: &K21_WEIGHTS,
        gauss_weights: &G10_WEIGHTS,
    };

    /// Number of integrand evaluations per application of the rule
    pub fn evaluations(&self) -> usize {
        2 * self.nodes.len() - 1
    }

    fn gauss_uses_centre(&self) -> bool {
        self.gauss_weights.len() > (self.nodes.len() - 1) / 2
    }

    /// Apply the rule once on `[a, b]`.
    ///
    /// The error estimate is the gap between the Kronrod and embedded Gauss
    /// values. A non-finite integrand value aborts with
    /// [`QuadratureError::NonFinite`].
    pub fn apply<F, E>(&self, f: &mut F, a: f64, b: f64) -> Result<Estimate, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: From<QuadratureError>,
    {
        let centre = 0.5 * (a + b);
        let half = 0.5 * (b - a);
        let last = self.nodes.len() - 1;

        let f_centre = sample(f, centre)?;
        let mut kronrod = self.kronrod_weights[last] * f_centre;
        let mut gauss = if self.gauss_uses_centre() {
            self.gauss_weights[self.gauss_weights.len() - 1] * f_centre
        } else {
            0.0
        };

        for j in 0..last {
            let dx = half * self.nodes[j];
            let pair = sample(f, centre - dx)? + sample(f, centre + dx)?;
            kronrod += self.kronrod_weights[j] * pair;
            if j % 2 == 1 {
                gauss += self.gauss_weights[j / 2] * pair;
            }
        }

        Ok(Estimate {
            value: kronrod * half,
            error: ((kronrod - gauss) * half).abs(),
            evaluations: self.evaluations(),
        })
    }
}

#[inline]
fn sample<F, E>(f: &mut F, x: f64) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<QuadratureError>,
{
    let y = f(x)?;
    if !y.is_finite() {
        return Err(QuadratureError::NonFinite { x, value: y }.into());
    }
    Ok(y)
}
