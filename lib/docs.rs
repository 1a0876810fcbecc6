//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [B-splines](#b-splines)
//! - [Node distributions](#node-distributions)
//! - [Exterior complex scaling](#exterior-complex-scaling)
//! - [Matrix elements](#matrix-elements)
//!
//! # Background
//! Many problems in atomic physics reduce to a one-dimensional radial equation
//! of the form
//! ```text
//!   1 ∂²u   l (l + 1)
//! - - --- + --------- u + V(r) u = E u
//!   2 ∂r²     2 r²
//! ```
//! (atomic units) for the reduced radial wavefunction *u*(*r*) = *r* *R*(*r*)
//! on a finite box 0 ≤ *r* ≤ *r*ₘₐₓ. Expanding *u* over a finite set of
//! localized, smooth basis functions turns this into a generalized matrix
//! eigenvalue problem (bound states) or a linear system (scattering and
//! time-dependent problems). Piecewise polynomials (B-splines) are a popular
//! choice[^1] since they are compactly supported, which makes every operator
//! matrix banded, and since they can be made arbitrarily smooth and accurate by
//! raising the polynomial order without changing the grid.
//!
//! # B-splines
//! Given a non-decreasing knot sequence *t*, the B-splines of order *k*
//! (polynomial degree *k* - 1) are defined by the Cox-de Boor recursion[^2]
//! ```text
//! B[i, 1](x) = 1 if t[i] ≤ x < t[i + 1] else 0
//!
//!              x - t[i]                      t[i + k] - x
//! B[i, k] = ------------------- B[i, k - 1] + ------------------- B[i + 1, k - 1]
//!           t[i + k - 1] - t[i]               t[i + k] - t[i + 1]
//! ```
//! where any term with a vanishing denominator is dropped. Each *B*[*i*, *k*]
//! is non-negative, supported on [*t*[*i*], *t*[*i* + *k*]] (i.e. on *k*
//! consecutive knot intervals), and the full set sums to 1 at every point of
//! the grid. At a simple knot, *B*[*i*, *k*] has *k* - 2 continuous
//! derivatives.
//!
//! Here, the knot sequence is built from *N* grid nodes by repeating the first
//! and last nodes *k* times ("clamping"), which gives *N* + 2 (*k* - 1) knots
//! and *N* + *k* - 2 B-splines. Only the first B-spline is non-zero at the first
//! node, and only the last at the last node; dropping either from the basis
//! imposes a zero boundary condition on any function expanded in the rest.
//!
//! Rather than running the recursion at every evaluation point, the recursion
//! is carried out once on polynomial coefficients: on each knot interval, every
//! B-spline is stored as a polynomial in the local coordinate *r* = (*x* -
//! *t*[*j*]) / (*t*[*j* + 1] - *t*[*j*]) ∊ [0, 1]. Evaluation of the *n*-th
//! derivative then reduces to
//! ```text
//!  dⁿB         1       k-1       d!
//! ---- = ----------- *  Σ  c[d] -------- rᵈ⁻ⁿ
//! dxⁿ    (δt[j])ⁿ      d=n      (d - n)!
//! ```
//! which is exact up to rounding in the coefficients.
//!
//! # Node distributions
//! Four node distributions are available for *N* nodes *x*[0], ...,
//! *x*[*N* - 1] between *x*ₘᵢₙ and *x*ₘₐₓ, with *s* = *i* / (*N* - 1):
//! - linear: uniform spacing
//! - exponential: *x*ₘᵢₙ + (*x*ₘₐₓ - *x*ₘᵢₙ) (exp(*g* *s*) - 1) / (exp(*g*) - 1),
//!   accumulating nodes near *x*ₘᵢₙ where bound states vary most rapidly
//! - sine-like: *x*ₘᵢₙ + *x*ₘₐₓ sin(π/2 *s*ᵃ)
//! - parabolic-linear: quadratic spacing up to a break node determined by a
//!   characteristic position *x*₀, then linear, with continuous position and
//!   spacing across the break
//!
//! # Exterior complex scaling
//! Scattering and ionization problems on a finite box suffer from
//! reflections of outgoing flux off the box boundary. Exterior complex
//! scaling[^3] (ECS) avoids this by continuing the radial coordinate into the
//! complex plane beyond some point *r*₀:
//! ```text
//!        ⎧ x                       x ≤ r₀
//! R(x) = ⎨
//!        ⎩ r₀ + (x - r₀) exp(i θ)  x > r₀
//! ```
//! An outgoing wave exp(*i* *k* *R*) then decays as exp(-*k* (*x* - *r*₀)
//! sin *θ*) along the rotated part of the contour and can be truncated at the
//! box edge without reflection, while the solution on the unscaled part
//! (*x* ≤ *r*₀) is left unchanged. The Hamiltonian becomes complex symmetric
//! rather than Hermitian, and its spectrum contains resonances as isolated
//! complex eigenvalues, with continua rotated into the lower half-plane by
//! -2 *θ*.
//!
//! To keep the basis functions analytic along each piece of the contour, *r*₀
//! is placed on a grid node (the nearest node below the requested position)
//! and the knots are taken to be the images *R*(*x*) of the grid nodes. The
//! B-splines are then ordinary polynomials in the complex coordinate on every
//! interval, built by the same recursion with complex knots. Their
//! derivatives are taken with respect to *R*, as required by the scaled
//! Hamiltonian.
//!
//! # Matrix elements
//! All matrix elements take the form
//! ```text
//!   ⌠          dᵐB[i]    dⁿB[j]
//!   ⎮ f(R) ⋅ ------- ⋅ ------- dR
//!   ⌡         dRᵐ       dRⁿ
//!   C
//! ```
//! along the contour *C*. Since the support of each B-spline covers *k*
//! intervals, the integral vanishes whenever |*i* - *j*| ≥ *k*; otherwise it is
//! split over the intervals of the common support. Each interval is a straight
//! segment in the complex plane, on which a 64-point Gauss-Legendre rule[^4] is
//! applied. This rule is exact for polynomial integrands of degree up to 127,
//! and hence for the overlap and kinetic energy matrices of any practical
//! order, and converges rapidly for smooth weights such as 1/*r* away from the
//! origin. No integration point ever coincides with the endpoint *r* = 0.
//!
//! [^1]: H. Bachau, E. Cormier, P. Decleva, J. E. Hansen, and F. Martín,
//! "Applications of B-splines in atomic and molecular physics." Rep. Prog.
//! Phys. **64** 1815 (2001).
//!
//! [^2]: C. de Boor, *A Practical Guide to Splines* (Springer, 1978).
//!
//! [^3]: C. W. McCurdy, M. Baertschy, and T. N. Rescigno, "Solving the
//! three-body Coulomb breakup problem using exterior complex scaling."
//! J. Phys. B **37** R137 (2004).
//!
//! [^4]: W. H. Press, S. A. Teukolsky, W. T. Vetterling, and B. P. Flannery,
//! *Numerical Recipes*, 3rd ed., §4.6 (Cambridge University Press, 2007).
